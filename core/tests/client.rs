//! Async-client flows against the live mock server.
//!
//! Mirrors the blocking suite's pipeline on [`pdfgate::Client`], plus
//! concurrent use of one client from several tasks.

use pdfgate::{
    Client, CompressPdfParams, DocumentStatus, DocumentType, Error, ExtractPdfFormDataParams,
    FileUpload, FlattenPdfParams, GeneratePdfParams, GetDocumentParams, GetFileParams,
    WatermarkPdfParams, WatermarkType,
};

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        mock_server::run(listener).await.unwrap();
    });
    format!("http://{addr}")
}

async fn client() -> Client {
    Client::with_base_url("test_integration", &start_server().await).unwrap()
}

#[tokio::test]
async fn pdf_pipeline_lifecycle() {
    let client = client().await;

    let bytes = client
        .generate_pdf(&GeneratePdfParams::from_url("https://example.com/invoice"))
        .await
        .unwrap()
        .into_bytes()
        .unwrap();
    assert!(bytes.starts_with(b"%PDF-"));

    let mut params = GeneratePdfParams::from_html("<h1>Report</h1>");
    params.json_response = true;
    let document = client.generate_pdf(&params).await.unwrap().into_document().unwrap();
    assert_eq!(document.status, DocumentStatus::Completed);
    assert_eq!(document.document_type, Some(DocumentType::FromHtml));
    let size = document.size.unwrap();
    let id = document.id.clone();

    let fetched = client.get_document(&GetDocumentParams::new(&id)).await.unwrap();
    assert_eq!(fetched.id, id);

    let stored = client.get_file(&GetFileParams::new(&id)).await.unwrap();
    assert_eq!(stored.len() as u64, size);

    let mut params = FlattenPdfParams::by_document_id(&id);
    params.json_response = true;
    let flattened = client.flatten_pdf(&params).await.unwrap().into_document().unwrap();
    assert_eq!(flattened.derived_from.as_deref(), Some(id.as_str()));

    let mut params = CompressPdfParams::by_document_id(&id);
    params.json_response = true;
    let compressed = client.compress_pdf(&params).await.unwrap().into_document().unwrap();
    assert!(compressed.size.unwrap() < size);

    let mut params = WatermarkPdfParams::by_document_id(&id, WatermarkType::Text);
    params.text = Some("DRAFT".to_string());
    params.json_response = true;
    let watermarked = client.watermark_pdf(&params).await.unwrap().into_document().unwrap();
    assert_eq!(watermarked.document_type, Some(DocumentType::Watermarked));

    let fields = client
        .extract_pdf_form_data(&ExtractPdfFormDataParams::by_file(FileUpload::new(
            "filled.pdf",
            &b"%PDF-1.4 filled"[..],
        )))
        .await
        .unwrap();
    assert_eq!(fields["first_name"], "John");
}

#[tokio::test]
async fn one_client_serves_concurrent_tasks() {
    let client = client().await;

    let mut params = GeneratePdfParams::from_html("<p>shared</p>");
    params.json_response = true;
    let id = client.generate_pdf(&params).await.unwrap().into_document().unwrap().id;

    let a = client.clone();
    let b = client.clone();
    let id_a = id.clone();
    let id_b = id.clone();
    let (left, right) = tokio::join!(
        tokio::spawn(async move { a.get_document(&GetDocumentParams::new(id_a)).await }),
        tokio::spawn(async move { b.get_file(&GetFileParams::new(id_b)).await }),
    );
    let document = left.unwrap().unwrap();
    let bytes = right.unwrap().unwrap();
    assert_eq!(document.id, id);
    assert_eq!(bytes.len() as u64, document.size.unwrap());
}

#[tokio::test]
async fn server_refusals_carry_the_server_message() {
    let client = client().await;

    let err = client.get_document(&GetDocumentParams::new("missing")).await.unwrap_err();
    match err {
        Error::Http { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Document not found");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}
