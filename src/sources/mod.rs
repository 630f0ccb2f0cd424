//! Built-in bulletin sources, one module per state.
//!
//! Each module only describes *where* its bulletins live and *how* the
//! dates are written; the scraping itself is done by
//! [`SourceResolver`](crate::services::SourceResolver).

pub mod andhra_pradesh;
pub mod delhi;
pub mod kerala;
pub mod tamil_nadu;
pub mod telangana;

use crate::models::SourceConfig;

pub const KERALA: &str = "Kerala";
pub const DELHI: &str = "Delhi";
pub const TELANGANA: &str = "Telangana";
pub const ANDHRA_PRADESH: &str = "AndhraPradesh";
pub const TAMIL_NADU: &str = "TamilNadu";

/// All built-in sources in resolution order.
pub fn all() -> Vec<SourceConfig> {
    vec![
        kerala::source(),
        delhi::source(),
        telangana::source(),
        andhra_pradesh::source(),
        tamil_nadu::source(),
    ]
}

/// Date formats shared by the sources that spell months out or use numbers.
pub(crate) fn word_then_numeric_formats() -> Vec<String> {
    vec!["%d %B %Y".to_string(), "%d %m %Y".to_string()]
}
