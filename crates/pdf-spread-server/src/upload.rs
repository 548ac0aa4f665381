//! Request decoding: one adapter per transport
//!
//! Both transports produce the same [`SpreadUpload`], so the handler never
//! knows how the document arrived.

use crate::error::ApiError;
use axum::{
    Json, async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header,
};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use pdf_spread::{PairingTable, SpreadError};
use serde::Deserialize;

/// A decoded upload: raw PDF bytes plus an optional pairing table
#[derive(Debug, Clone)]
pub struct SpreadUpload {
    pub pdf: Vec<u8>,
    /// Overrides the deployment's table when present
    pub pairings: Option<PairingTable>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonUpload {
    pdf_base64: Option<String>,
    page_pairs: Option<PairingTable>,
}

/// Decode a base64 payload, tolerating a `data:` URL prefix and line breaks
pub fn decode_base64_pdf(encoded: &str) -> Result<Vec<u8>, ApiError> {
    let payload = match encoded.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => encoded,
    };
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Err(SpreadError::MissingInput.into());
    }
    Ok(BASE64.decode(compact)?)
}

fn parse_page_pairs(text: &str) -> Result<PairingTable, ApiError> {
    serde_json::from_str(text)
        .map_err(|e| ApiError::BadRequest(format!("Invalid pagePairs: {}", e)))
}

impl SpreadUpload {
    fn from_json(Json(body): Json<JsonUpload>) -> Result<Self, ApiError> {
        let encoded = body.pdf_base64.ok_or(SpreadError::MissingInput)?;
        Ok(SpreadUpload {
            pdf: decode_base64_pdf(&encoded)?,
            pairings: body.page_pairs,
        })
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut pdf = None;
        let mut pairings = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();
            tracing::debug!(
                "Received field: name='{}', filename={:?}",
                name,
                field.file_name()
            );

            match name.as_str() {
                "pdf" | "file" => pdf = Some(field.bytes().await?.to_vec()),
                "pdfBase64" => pdf = Some(decode_base64_pdf(&field.text().await?)?),
                "pagePairs" => {
                    let text = field.text().await?;
                    if !text.trim().is_empty() {
                        pairings = Some(parse_page_pairs(&text)?);
                    }
                }
                _ => tracing::debug!("Ignoring multipart field '{}'", name),
            }
        }

        match pdf {
            Some(pdf) if !pdf.is_empty() => Ok(SpreadUpload { pdf, pairings }),
            _ => Err(SpreadError::MissingInput.into()),
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for SpreadUpload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_ascii_lowercase());

        match content_type.as_deref() {
            Some(ct) if ct.starts_with("multipart/form-data") => {
                let multipart = Multipart::from_request(req, state).await?;
                Self::from_multipart(multipart).await
            }
            Some(ct) if ct.starts_with("application/json") => {
                let body = Json::<JsonUpload>::from_request(req, state).await?;
                Self::from_json(body)
            }
            _ => Err(SpreadError::MissingInput.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_and_data_url() {
        let encoded = BASE64.encode(b"%PDF-1.7");
        assert_eq!(decode_base64_pdf(&encoded).unwrap(), b"%PDF-1.7");

        let url = format!("data:application/pdf;base64,{}", encoded);
        assert_eq!(decode_base64_pdf(&url).unwrap(), b"%PDF-1.7");

        let wrapped = format!("{}\n{}", &encoded[..4], &encoded[4..]);
        assert_eq!(decode_base64_pdf(&wrapped).unwrap(), b"%PDF-1.7");
    }

    #[test]
    fn test_decode_empty_is_missing_input() {
        let err = decode_base64_pdf("  ").unwrap_err();
        assert!(matches!(err, ApiError::Spread(SpreadError::MissingInput)));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_base64_pdf("***not base64***").unwrap_err();
        assert!(matches!(err, ApiError::Base64(_)));
    }

    #[test]
    fn test_page_pairs_text() {
        let table = parse_page_pairs(r#"[[1, "blank"], [0, 2]]"#).unwrap();
        assert_eq!(table.len(), 2);
        assert!(parse_page_pairs("[[-1, 0]]").is_err());
        assert!(parse_page_pairs("[]").is_err());
    }
}
