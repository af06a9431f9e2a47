pub mod admin;
pub mod contact;
pub mod health;
pub mod media;
pub mod pages;
pub mod portfolio;
pub mod projects;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}
