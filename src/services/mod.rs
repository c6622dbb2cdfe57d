pub mod fallback;
pub mod flashcard_service;
pub mod generation_client;
pub mod prompt;
pub mod response_parser;
