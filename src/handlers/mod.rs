pub mod flashcard_handler;
pub mod generation_handler;
pub mod root_handler;
