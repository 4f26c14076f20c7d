//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and hand plain values to the
//! services. The bot never writes to the database.

pub mod counting;

#[cfg(test)]
mod test;
