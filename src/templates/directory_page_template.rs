use askama::Template;

use crate::models::UserRecord;

#[derive(Template)]
#[template(path = "directory.html")]
pub struct DirectoryPageTemplate<'a> {
    pub api_hostname: String,
    pub records: &'a [UserRecord],
    pub form_name: &'a str,
    pub form_email: &'a str,
    pub editing: bool,
}
