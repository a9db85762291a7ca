//! HTTP/1.1 Protocol.
//!
//! - [`parser`] contains request line parser.
//! - [`io`] contains the byte source abstraction and read buffer.
//! - [`driver`] contains the integration of all the components above into single API

pub mod parser;
pub mod io;
pub mod driver;

#[cfg(test)]
mod test;
