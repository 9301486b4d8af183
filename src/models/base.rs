// src/models/base.rs

/// Contrato comum de Empresa, Categoria e Produto.
///
/// Toda linha carrega `created_at`, `updated_at` e a flag `deleted`. Nenhuma leitura
/// devolve linhas com `deleted = true`; a exclusão apenas liga a flag e renova
/// `updated_at`, a linha física continua no banco.
pub trait SoftDeletable {
    /// Tabela onde a entidade vive (usada pelos helpers genéricos de `db::soft_delete`).
    const TABLE: &'static str;
}
