pub mod directory_page_template;

pub use directory_page_template::DirectoryPageTemplate;
