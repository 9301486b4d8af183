pub mod store;
pub use store::{CategoriaStore, EmpresaStore, ProdutoStore, UserStore};
pub mod soft_delete;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod empresa_repo;
pub use empresa_repo::EmpresaRepository;
pub mod catalog_repo;
pub use catalog_repo::{CategoriaRepository, ProdutoRepository};
