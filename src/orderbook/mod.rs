//! Order book data structures.
//!
//! ## Components
//!
//! - [`OrderNode`]: Order plus linked-list pointers, stored in a slab
//! - [`PriceLevel`]: FIFO queue of orders at one price
//! - [`BookSide`]: Price levels for one side, best price first
//! - [`OrderIndex`]: Order ID to [`Location`] mapping
//! - [`OrderBook`]: Both sides and the index
//! - [`BookSnapshot`]: Read-only view for reporting
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Insert order | O(log L) |
//! | Best level | O(log L) |
//! | Cancel by ID | O(log L) |
//! | Fill front order | O(1) |
//!
//! L is the number of distinct price levels on a side.

pub mod book;
pub mod index;
pub mod level;
pub mod node;
pub mod side;
pub mod snapshot;

pub use book::OrderBook;
pub use index::{Location, OrderIndex};
pub use level::PriceLevel;
pub use node::OrderNode;
pub use side::BookSide;
pub use snapshot::{BookSnapshot, LevelSnapshot};
