//! File persistence configuration

pub struct PersistenceConfig {
    /// SQLite file holding the price history table
    pub db_path: &'static str,
    /// Rows per INSERT statement; keeps us well inside SQLite's bind parameter limit
    pub insert_chunk: usize,
    /// Where `train` writes the exported network by default
    pub model_path: &'static str,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    db_path: "price_history.sqlite",
    insert_chunk: 3000,
    model_path: "model.json",
};
