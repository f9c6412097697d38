// ============================================================================
// HTTP - Transporte (una ida y vuelta por request, sin reintentos)
// ============================================================================

use std::fmt;
use async_trait::async_trait;
use crate::services::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parte de un formulario multipart
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, filename: String, content_type: String, bytes: Vec<u8> },
}

/// Formulario multipart. Se envía tal cual: el navegador pone el boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    pub parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text { name: name.into(), value: value.into() });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        });
        self
    }
}

/// Cuerpo ya codificado
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(String),
    Multipart(MultipartForm),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Valor del header (case-insensitive), el último gana
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Emite un request y devuelve la respuesta cruda
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(target_arch = "wasm32")]
pub use browser::GlooTransport;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{FormPart, HttpRequest, HttpResponse, HttpTransport, Method, MultipartForm, RequestBody};
    use crate::services::error::TransportError;
    use async_trait::async_trait;
    use gloo_net::http::{Request, RequestBuilder};
    use web_sys::{Blob, BlobPropertyBag, FormData};

    /// Transporte del navegador (`fetch` vía gloo-net)
    #[derive(Debug, Clone, Copy, Default)]
    pub struct GlooTransport;

    fn builder_for(method: Method, url: &str) -> RequestBuilder {
        match method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Patch => Request::patch(url),
            Method::Delete => Request::delete(url),
        }
    }

    fn to_form_data(form: &MultipartForm) -> Result<FormData, TransportError> {
        let invalid = |e: wasm_bindgen::JsValue| TransportError::InvalidBody(format!("{:?}", e));
        let data = FormData::new().map_err(invalid)?;
        for part in &form.parts {
            match part {
                FormPart::Text { name, value } => {
                    data.append_with_str(name, value).map_err(invalid)?;
                }
                FormPart::File { name, filename, content_type, bytes } => {
                    let chunk = js_sys::Uint8Array::from(bytes.as_slice());
                    let chunks = js_sys::Array::of1(&chunk);
                    let options = BlobPropertyBag::new();
                    options.set_type(content_type);
                    let blob = Blob::new_with_u8_array_sequence_and_options(&chunks, &options)
                        .map_err(invalid)?;
                    data.append_with_blob_and_filename(name, &blob, filename).map_err(invalid)?;
                }
            }
        }
        Ok(data)
    }

    #[async_trait(?Send)]
    impl HttpTransport for GlooTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let mut builder = builder_for(request.method, &request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let built = match &request.body {
                None => builder.build(),
                Some(RequestBody::Json(text)) => builder.body(text.as_str()),
                Some(RequestBody::Multipart(form)) => builder.body(to_form_data(form)?),
            }
            .map_err(|e| TransportError::InvalidBody(e.to_string()))?;

            let response = built
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;

            let status = response.status();
            // Cuerpo ilegible = cuerpo vacío; el cliente lo trata como `{}`
            let body = response.text().await.unwrap_or_default();
            Ok(HttpResponse { status, body })
        }
    }
}
