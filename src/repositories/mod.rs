pub mod document_repository;

pub use document_repository::{DocumentRepository, FileDocumentRepository};

#[cfg(test)]
pub use document_repository::MockDocumentRepository;
