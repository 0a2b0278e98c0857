//! Positional reading over a flat token stream.
//!
//! ```
//! use ruletab::stream::TokenCursor;
//!
//! let tokens = [3, 4, 2, 97, 122, 0, 0, 0xFFFF];
//! let mut cursor = TokenCursor::new(&tokens);
//!
//! assert_eq!(cursor.next().unwrap(), (0, 3));
//! assert_eq!(cursor.next().unwrap(), (1, 4));
//! assert_eq!(cursor.next().unwrap(), (2, 2));
//! assert_eq!(cursor.advance_by(2).unwrap(), &[97, 122]);
//! assert_eq!(cursor.position(), 5);
//! ```

mod cursor;

pub use cursor::{StreamError, Token, TokenCursor};
