// euicc-serial/src/http/client.rs

use std::time::Duration;

use log::{debug, error};
use reqwest::Certificate;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;

use crate::Result;
use crate::http::{HttpContext, HttpInterface, HttpRequest, HttpResponse};
use crate::interface::{DriverInfo, DriverKind};

pub const REQWEST_HTTP_DRIVER: DriverInfo = DriverInfo {
    kind: DriverKind::Http,
    name: "reqwest",
};

/// Blocking [`HttpInterface`] on top of `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestHttp {
    timeout: Duration,
    max_redirects: usize,
}

impl Default for ReqwestHttp {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            max_redirects: 10,
        }
    }
}

impl ReqwestHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    fn client(&self, ctx: &HttpContext) -> Result<Client> {
        let mut builder = Client::builder()
            .timeout(self.timeout)
            .redirect(Policy::limited(self.max_redirects));
        if let Some(bundle) = ctx.certificates() {
            for cert in Certificate::from_pem_bundle(bundle.as_pem())? {
                builder = builder.add_root_certificate(cert);
            }
        }
        Ok(builder.build()?)
    }
}

impl HttpInterface for ReqwestHttp {
    fn info(&self) -> DriverInfo {
        REQWEST_HTTP_DRIVER
    }

    fn transmit(&mut self, ctx: &HttpContext, request: &HttpRequest) -> Result<HttpResponse> {
        let client = self.client(ctx)?;
        let mut builder = match &request.body {
            Some(body) => client.post(&request.url).body(body.clone()),
            None => client.get(&request.url),
        };
        for (key, value) in request.header_pairs() {
            builder = builder.header(key, value);
        }

        debug!("{} {}", request.method(), request.url);
        let response = builder.send().inspect_err(|e| {
            error!("error performing http request: {}", e);
        })?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        debug!("HTTP status = {}, content_length = {}", status, body.len());
        Ok(HttpResponse::new(status, body))
    }
}
