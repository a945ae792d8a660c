mod error;
pub use error::{CoreError, CoreResult};

mod fetch;
pub use fetch::{Fetcher, UrlFetcher};

mod workflow;
pub use workflow::{SEND_COMMAND, send_command};
