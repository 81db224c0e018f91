use std::time::Duration;

use derive_builder::Builder;

pub trait Context<'a> {
    /// Base url of a JSONPlaceholder-compatible API.
    ///
    /// Example: https://jsonplaceholder.typicode.com, http://127.0.0.1:3000
    fn api_base_url(&self) -> &'a str;
    fn request_timeout(&self) -> Duration;
    /// Rows shown per page of the post list.
    fn page_size(&self) -> usize;
    fn spinner(&self) -> bool;
}

#[derive(Clone, Builder, PartialEq, Eq, Debug)]
pub struct Args {
    #[builder(default = "String::from(postview_api::DEFAULT_BASE_URL)")]
    api_base_url: String,
    #[builder(default = "postview_api::DEFAULT_TIMEOUT")]
    request_timeout: Duration,
    #[builder(default = "10")]
    page_size: usize,
    #[builder(default = "true")]
    spinner: bool,
}

impl Args {
    pub fn builder() -> ArgsBuilder {
        ArgsBuilder::default()
    }
}

impl<'a> Context<'a> for &'a Args {
    fn api_base_url(&self) -> &'a str {
        &self.api_base_url
    }

    fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    fn page_size(&self) -> usize {
        self.page_size.max(1)
    }

    fn spinner(&self) -> bool {
        self.spinner
    }
}
