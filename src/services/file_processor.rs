use std::time::Duration;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use reqwest::{header::CONTENT_TYPE, Client};
use crate::error::AppError;
use crate::services::profiler::{analyze, AnalysisOptions, AnalysisResult};

pub const CSV_MIME_TYPE: &str = "text/csv";

/// Accepts `text/csv`, ignoring parameters such as `charset`. Anything else,
/// including a missing type, is rejected before the content is read.
pub fn ensure_csv_content_type(content_type: Option<&str>) -> Result<(), AppError> {
    let received = content_type.unwrap_or("").trim();
    let essence = received.split(';').next().unwrap_or("").trim();
    if essence.eq_ignore_ascii_case(CSV_MIME_TYPE) {
        Ok(())
    } else {
        Err(AppError::InvalidFileType {
            received: if received.is_empty() { "none".to_string() } else { received.to_string() },
        })
    }
}

pub fn decode_csv(data: &[u8], max_file_size: usize) -> Result<String, AppError> {
    if data.len() > max_file_size {
        return Err(AppError::FileTooLarge { limit: max_file_size });
    }
    std::str::from_utf8(data)
        .map(str::to_string)
        .map_err(|e| AppError::MalformedInput(format!("file is not valid UTF-8: {}", e)))
}

/// Runs the analysis on the blocking pool so large tables do not stall the runtime.
pub async fn analyze_text(text: String, options: AnalysisOptions) -> Result<AnalysisResult, AppError> {
    tokio::task::spawn_blocking(move || analyze(&text, &options)).await?
}

pub async fn analyze_csv_bytes(
    data: Bytes,
    options: AnalysisOptions,
    max_file_size: usize,
) -> Result<AnalysisResult, AppError> {
    let text = decode_csv(&data, max_file_size)?;
    analyze_text(text, options).await
}

pub async fn load_file_from_url(url: &str, max_file_size: usize, timeout: Duration) -> Result<Bytes, AppError> {
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::FileProcessingError(format!("Failed to fetch file: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::FileProcessingError(
            format!("Failed to fetch file. Status: {}", response.status())
        ));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    ensure_csv_content_type(content_type)?;

    if let Some(len) = response.content_length() {
        if len > max_file_size as u64 {
            return Err(AppError::FileTooLarge { limit: max_file_size });
        }
    }

    let mut body = BytesMut::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| AppError::FileProcessingError(format!("Failed to read response bytes: {}", e)))?;
        if body.len() + chunk.len() > max_file_size {
            return Err(AppError::FileTooLarge { limit: max_file_size });
        }
        body.extend_from_slice(&chunk);
    }

    tracing::info!("Downloaded {}KB from remote URL", body.len() / 1024);
    Ok(body.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn accepts_csv_with_parameters() {
        assert_ok!(ensure_csv_content_type(Some("text/csv")));
        assert_ok!(ensure_csv_content_type(Some("Text/CSV; charset=utf-8")));
    }

    #[test]
    fn rejects_other_types() {
        let err = ensure_csv_content_type(Some("application/vnd.ms-excel")).unwrap_err();
        assert!(matches!(err, AppError::InvalidFileType { ref received } if received == "application/vnd.ms-excel"));
        assert_err!(ensure_csv_content_type(Some("text/plain")));
        assert!(matches!(
            ensure_csv_content_type(None),
            Err(AppError::InvalidFileType { ref received }) if received == "none"
        ));
    }

    #[test]
    fn decode_enforces_size_and_utf8() {
        assert_eq!(decode_csv(b"A\n1", 16).unwrap(), "A\n1");
        assert!(matches!(decode_csv(b"A\n12345", 4), Err(AppError::FileTooLarge { limit: 4 })));
        assert!(matches!(decode_csv(&[0xff, 0xfe, 0x41], 16), Err(AppError::MalformedInput(_))));
    }

    #[tokio::test]
    async fn analyzes_bytes_off_the_runtime() {
        let result = analyze_csv_bytes(
            Bytes::from_static(b"A,B\n1,x\n2,y\n3,x\n"),
            AnalysisOptions::default(),
            1024,
        )
        .await
        .unwrap();
        assert_eq!(result.row_count, 3);
        assert_eq!(result.column_count, 2);
    }

    #[tokio::test]
    async fn empty_upload_is_malformed() {
        let err = analyze_csv_bytes(Bytes::new(), AnalysisOptions::default(), 1024)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedInput(_)));
    }

    mod remote {
        use super::*;
        use axum::{body::Body, http::header, routing::get, Router};

        const LIMIT: usize = 100;

        async fn serve() -> String {
            let router = Router::new()
                .route("/data.csv", get(|| async { ([(header::CONTENT_TYPE, "text/csv")], "A,B\n1,x\n") }))
                .route("/notes.txt", get(|| async { ([(header::CONTENT_TYPE, "text/plain")], "A\n1\n") }))
                .route("/sized.csv", get(|| async { ([(header::CONTENT_TYPE, "text/csv")], "1\n".repeat(LIMIT)) }))
                .route(
                    "/chunked.csv",
                    get(|| async {
                        let chunks = (0..4).map(|_| Ok::<_, std::io::Error>(Bytes::from_static(&[b'1'; 40])));
                        ([(header::CONTENT_TYPE, "text/csv")], Body::from_stream(futures_util::stream::iter(chunks)))
                    }),
                );

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
            format!("http://{}", addr)
        }

        async fn fetch(base: &str, path: &str) -> Result<Bytes, AppError> {
            load_file_from_url(&format!("{}{}", base, path), LIMIT, Duration::from_secs(5)).await
        }

        #[tokio::test]
        async fn downloads_csv_body() {
            let base = serve().await;
            let body = assert_ok!(fetch(&base, "/data.csv").await);
            assert_eq!(&body[..], b"A,B\n1,x\n");
        }

        #[tokio::test]
        async fn error_status_is_a_processing_error() {
            let base = serve().await;
            let err = fetch(&base, "/missing.csv").await.unwrap_err();
            assert!(matches!(err, AppError::FileProcessingError(ref msg) if msg.contains("404")));
        }

        #[tokio::test]
        async fn non_csv_response_is_rejected() {
            let base = serve().await;
            let err = fetch(&base, "/notes.txt").await.unwrap_err();
            assert!(matches!(err, AppError::InvalidFileType { ref received } if received == "text/plain"));
        }

        #[tokio::test]
        async fn declared_length_over_limit_is_rejected() {
            let base = serve().await;
            let err = fetch(&base, "/sized.csv").await.unwrap_err();
            assert!(matches!(err, AppError::FileTooLarge { limit: LIMIT }));
        }

        #[tokio::test]
        async fn chunked_body_over_limit_is_rejected() {
            let base = serve().await;
            let err = fetch(&base, "/chunked.csv").await.unwrap_err();
            assert!(matches!(err, AppError::FileTooLarge { limit: LIMIT }));
        }

        #[tokio::test]
        async fn unreachable_host_is_a_processing_error() {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);
            assert_err!(fetch(&format!("http://{}", addr), "/data.csv").await);
        }
    }
}
