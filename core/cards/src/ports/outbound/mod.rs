//! Outbound ポート: usecase が生成・保存・ID 採番に使う trait

pub mod card_generator;
pub mod card_generator_factory;
pub mod id_generator;
pub mod preview_store;
pub mod profile_lister;
pub mod set_repository;

pub use card_generator::CardGenerator;
pub use card_generator_factory::CardGeneratorFactory;
pub use id_generator::IdGenerator;
pub use preview_store::PreviewStore;
pub use profile_lister::ProfileLister;
pub use set_repository::SetRepository;
