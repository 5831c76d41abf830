pub mod csv_analyzer;
pub mod llm_client;
pub mod prompt_builder;
