pub mod airtable_repository;
pub mod deepl_translator;

pub use airtable_repository::AirtableRepository;
pub use deepl_translator::DeepLTranslator;
