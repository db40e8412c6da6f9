use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::gateway::decode_json;
use crate::{DocumentId, DocumentRecord, FailureKind, Gateway, RequestError, TokenPair};

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

/// The backend operations the client consumes.
#[async_trait::async_trait]
pub trait DocumentApi: Send + Sync {
    async fn register(&self, username: &str, password: &str) -> Result<(), RequestError>;

    async fn obtain_token(&self, username: &str, password: &str)
        -> Result<TokenPair, RequestError>;

    async fn list_documents(&self) -> Result<Vec<DocumentRecord>, RequestError>;

    async fn upload_document(&self, path: &Path) -> Result<(), RequestError>;

    async fn delete_document(&self, id: DocumentId) -> Result<(), RequestError>;

    async fn ask_question(
        &self,
        question: &str,
        document_id: DocumentId,
    ) -> Result<String, RequestError>;
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct QuestionBody<'a> {
    question: &'a str,
    document_id: DocumentId,
}

#[derive(Deserialize)]
struct AnswerBody {
    answer: String,
}

#[derive(Debug, Clone)]
pub struct HttpDocumentApi {
    gateway: Gateway,
}

impl HttpDocumentApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }
}

#[async_trait::async_trait]
impl DocumentApi for HttpDocumentApi {
    async fn register(&self, username: &str, password: &str) -> Result<(), RequestError> {
        // Success body is ignored.
        self.gateway
            .post_json("register/", &CredentialsBody { username, password })
            .await?;
        Ok(())
    }

    async fn obtain_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenPair, RequestError> {
        let response = self
            .gateway
            .post_json("token/", &CredentialsBody { username, password })
            .await?;
        decode_json(response).await
    }

    async fn list_documents(&self) -> Result<Vec<DocumentRecord>, RequestError> {
        let response = self.gateway.get("documents/").await?;
        decode_json(response).await
    }

    async fn upload_document(&self, path: &Path) -> Result<(), RequestError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| RequestError::new(FailureKind::Io, format!("{}: {err}", path.display())))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let form = Form::new().part(UPLOAD_FIELD, Part::bytes(bytes).file_name(filename));
        self.gateway.post_multipart("documents/", form).await?;
        Ok(())
    }

    async fn delete_document(&self, id: DocumentId) -> Result<(), RequestError> {
        self.gateway.delete(&format!("documents/{id}/")).await?;
        Ok(())
    }

    async fn ask_question(
        &self,
        question: &str,
        document_id: DocumentId,
    ) -> Result<String, RequestError> {
        let response = self
            .gateway
            .post_json(
                "ask-question/",
                &QuestionBody {
                    question,
                    document_id,
                },
            )
            .await?;
        let body: AnswerBody = decode_json(response).await?;
        Ok(body.answer)
    }
}
