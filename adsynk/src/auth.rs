use std::{collections::HashSet, marker::PhantomData};

use http::{header, Request, Response, StatusCode};
use http_body::Body;
use tower_http::validate_request::ValidateRequest;

#[derive(Debug)]
pub struct TokenValidate<ResBody> {
    header_values: HashSet<String>,
    _ty: PhantomData<fn() -> ResBody>,
}

impl<ResBody> TokenValidate<ResBody> {
    pub fn new(tokens: Vec<String>) -> Self
    where
        ResBody: Body + Default,
    {
        Self {
            header_values: tokens
                .into_iter()
                .map(|token| format!("Bearer {}", token))
                .collect(),
            _ty: PhantomData,
        }
    }
}

impl<ResBody> Clone for TokenValidate<ResBody> {
    fn clone(&self) -> Self {
        Self {
            header_values: self.header_values.clone(),
            _ty: PhantomData,
        }
    }
}

impl<B, ResBody> ValidateRequest<B> for TokenValidate<ResBody>
where
    ResBody: Body + Default,
{
    type ResponseBody = ResBody;

    fn validate(&mut self, request: &mut Request<B>) -> Result<(), Response<Self::ResponseBody>> {
        if self.header_values.is_empty() {
            return Ok(());
        }
        let actual = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        match actual {
            Some(actual) if self.header_values.contains(actual) => Ok(()),
            _ => {
                let mut res = Response::new(ResBody::default());
                *res.status_mut() = StatusCode::UNAUTHORIZED;
                Err(res)
            }
        }
    }
}
