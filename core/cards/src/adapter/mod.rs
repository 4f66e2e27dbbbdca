//! アダプター（cards 固有の Outbound ポート実装）

pub mod ai_card_generator;
pub mod json_file_preview_store;
pub mod json_file_set_repository;
pub mod profile_lister;
pub mod prompt;
pub mod response_parser;
pub mod std_card_generator_factory;
pub mod std_id_generator;

pub use ai_card_generator::AiCardGenerator;
pub use json_file_preview_store::JsonFilePreviewStore;
pub use json_file_set_repository::JsonFileSetRepository;
pub use profile_lister::StdProfileLister;
pub use std_card_generator_factory::StdCardGeneratorFactory;
pub use std_id_generator::StdIdGenerator;
