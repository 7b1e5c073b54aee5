//! End-to-end flows against the live mock server using the blocking client.
//!
//! # Design
//! Starts the mock server on a random port in a background thread, then
//! drives every operation over real HTTP. `reqwest::blocking` refuses to run
//! inside an async runtime, so these are plain `#[test]` functions.

use pdfgate::{
    BlockingClient, CompressPdfParams, DocumentStatus, DocumentType, Error,
    ExtractPdfFormDataParams, FileUpload, FlattenPdfParams, GeneratePdfParams, GetDocumentParams,
    GetFileParams, ProtectPdfParams, WatermarkPdfParams, WatermarkType,
};
use serde_json::json;

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn client() -> BlockingClient {
    BlockingClient::with_base_url("test_integration", &start_server()).unwrap()
}

#[test]
fn pdf_pipeline_lifecycle() {
    let client = client();

    // Step 1: generate raw PDF bytes from HTML.
    let bytes = client
        .generate_pdf(&GeneratePdfParams::from_html("<h1>Report</h1>"))
        .unwrap()
        .into_bytes()
        .unwrap();
    assert!(bytes.starts_with(b"%PDF-"));

    // Step 2: generate again, asking for a document record.
    let mut params = GeneratePdfParams::from_html("<h1>Report</h1>");
    params.json_response = true;
    params.metadata = Some(json!({"invoice_number": 42}));
    let document = client.generate_pdf(&params).unwrap().into_document().unwrap();
    assert_eq!(document.status, DocumentStatus::Completed);
    assert_eq!(document.document_type, Some(DocumentType::FromHtml));
    assert!(document.created_at <= document.expires_at);
    assert!(document.file_url.is_some());
    let size = document.size.unwrap();
    assert!(size > 0);
    // metadata keys round-trip through the wire-case conversion
    assert_eq!(document.metadata, Some(json!({"invoice_number": 42})));
    let id = document.id.clone();

    // Step 3: fetch the record, with a pre-signed URL lifetime.
    let mut params = GetDocumentParams::new(&id);
    params.pre_signed_url_expires_in = Some(120);
    let fetched = client.get_document(&params).unwrap();
    assert_eq!(fetched.id, id);
    assert!(fetched.file_url.unwrap().contains("expiresIn=120"));

    // Step 4: download the stored bytes.
    let stored = client.get_file(&GetFileParams::new(&id)).unwrap();
    assert!(stored.starts_with(b"%PDF-"));
    assert_eq!(stored.len() as u64, size);

    // Step 5: flatten by document id; parentage is recorded.
    let mut params = FlattenPdfParams::by_document_id(&id);
    params.json_response = true;
    let flattened = client.flatten_pdf(&params).unwrap().into_document().unwrap();
    assert_eq!(flattened.document_type, Some(DocumentType::Flattened));
    assert_eq!(flattened.derived_from.as_deref(), Some(id.as_str()));

    // Step 6: compress by document id; the stored copy shrinks.
    let mut params = CompressPdfParams::by_document_id(&id);
    params.json_response = true;
    let compressed = client.compress_pdf(&params).unwrap().into_document().unwrap();
    assert_eq!(compressed.document_type, Some(DocumentType::Compressed));
    assert!(compressed.size.unwrap() < size);

    // Step 7: watermark by document id.
    let mut params = WatermarkPdfParams::by_document_id(&id, WatermarkType::Text);
    params.text = Some("DRAFT".to_string());
    params.json_response = true;
    let watermarked = client.watermark_pdf(&params).unwrap().into_document().unwrap();
    assert_eq!(watermarked.document_type, Some(DocumentType::Watermarked));

    // Step 8: extract form data; keys come back in snake_case.
    let fields = client
        .extract_pdf_form_data(&ExtractPdfFormDataParams::by_document_id(&id))
        .unwrap();
    assert_eq!(fields["first_name"], "John");
    assert_eq!(fields["last_name"], "Doe");
}

#[test]
fn uploads_round_trip_as_bytes() {
    let client = client();

    let mut pdf = b"%PDF-1.4\n".to_vec();
    pdf.extend(std::iter::repeat(b'q').take(120));
    let original_len = pdf.len();

    // Flatten an uploaded file; the bytes come back unchanged.
    let flattened = client
        .flatten_pdf(&FlattenPdfParams::by_file(FileUpload::new("form.pdf", pdf.clone())))
        .unwrap()
        .into_bytes()
        .unwrap();
    assert_eq!(flattened.as_ref(), pdf.as_slice());

    // Protect an uploaded file; raw bytes come back by default.
    let protected = client
        .protect_pdf(&ProtectPdfParams::by_file(FileUpload::new("in.pdf", pdf.clone())))
        .unwrap()
        .into_bytes()
        .unwrap();
    assert!(protected.ends_with(b"% encrypted\n"));

    // Compress an uploaded file; the returned bytes are strictly smaller.
    let compressed = client
        .compress_pdf(&CompressPdfParams::by_file(FileUpload::new("in.pdf", pdf)))
        .unwrap()
        .into_bytes()
        .unwrap();
    assert!(compressed.len() < original_len);
}

#[test]
fn server_refusals_carry_the_server_message() {
    let client = client();

    // Unknown document id.
    let err = client.get_document(&GetDocumentParams::new("missing")).unwrap_err();
    match &err {
        Error::Http { status, message } => {
            assert_eq!(*status, 404);
            assert_eq!(message, "Document not found");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
    assert!(err.to_string().contains("status 404"));

    // Text watermark without text is refused server-side.
    let params = WatermarkPdfParams::by_file(
        FileUpload::new("in.pdf", &b"%PDF-1.4"[..]),
        WatermarkType::Text,
    );
    let err = client.watermark_pdf(&params).unwrap_err();
    match err {
        Error::Http { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Required field 'text' is missing");
        }
        other => panic!("expected Http error, got {other:?}"),
    }

    // An empty key still reaches the server and is refused there.
    let anonymous = BlockingClient::with_base_url("", client.base_url()).unwrap();
    let err = anonymous.get_document(&GetDocumentParams::new("any")).unwrap_err();
    match err {
        Error::Http { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Missing or invalid API key");
        }
        other => panic!("expected Http error, got {other:?}"),
    }

    // Nothing is listening here: the failure is transport, not HTTP.
    let dead = BlockingClient::with_base_url("test_integration", "http://127.0.0.1:9").unwrap();
    let err = dead.get_file(&GetFileParams::new("any")).unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
