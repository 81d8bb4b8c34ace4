#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("template can not be empty")]
    EmptyTemplate,

    #[error("template must start with '/': template = {0:?}")]
    MissingLeadingSlash(Box<str>),

    #[error("parameter name can not be empty: template = {0:?}")]
    EmptyParamName(Box<str>),

    #[error("duplicate parameter name {name:?}: template = {template:?}")]
    DuplicateParam { template: Box<str>, name: Box<str> },

    #[error("unbalanced braces: template = {0:?}")]
    UnbalancedBraces(Box<str>),

    #[error("wildcard parameter must be the last parameter: template = {0:?}")]
    WildcardNotLast(Box<str>),

    #[error("invalid parameter regex: template = {template:?}: {source}")]
    InvalidRegex {
        template: Box<str>,
        #[source]
        source: regex::Error,
    },

    #[error("invalid http method: {0:?}")]
    InvalidMethod(Box<str>),

    #[error("prefix must start with '/' and be at least 2 bytes long: prefix = {0:?}")]
    InvalidPrefix(Box<str>),

    #[error("route already registered: {method} {template}")]
    DuplicateRoute { method: http::Method, template: Box<str> },
}

impl Error {
    pub(crate) fn invalid_regex(template: &str, source: regex::Error) -> Self {
        Self::InvalidRegex {
            template: template.into(),
            source,
        }
    }
}
