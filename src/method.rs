use crate::error::Error;

use http::Method;

/// Values accepted where a route method is expected.
pub trait IntoMethod {
    fn into_method(self) -> Result<Method, Error>;
}

impl IntoMethod for Method {
    fn into_method(self) -> Result<Method, Error> {
        Ok(self)
    }
}

impl IntoMethod for &Method {
    fn into_method(self) -> Result<Method, Error> {
        Ok(self.clone())
    }
}

impl IntoMethod for &str {
    fn into_method(self) -> Result<Method, Error> {
        if self.is_empty() {
            return Err(Error::InvalidMethod(self.into()));
        }
        Method::from_bytes(self.as_bytes()).map_err(|_| Error::InvalidMethod(self.into()))
    }
}

impl IntoMethod for String {
    fn into_method(self) -> Result<Method, Error> {
        self.as_str().into_method()
    }
}
