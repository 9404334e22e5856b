//! # wirecheck-ts
//!
//! TypeScript frontend for wirecheck, built on the OXC parser.
//!
//! Sources are parsed once and lowered into an owned declaration arena.
//! [`TsProgram`] implements [`wirecheck_graph::DiscoveryProtocol`] over that
//! arena, so the graph engine can discover providers and builders and
//! validate their wiring.
//!
//! ## Quick Start
//!
//! ```rust
//! use wirecheck_ts::{DiscoveryOptions, TsProgram};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let program = TsProgram::from_sources(
//!     [
//!         ("inject.ts", "export class Provider {}\nexport interface Builder {}"),
//!         (
//!             "app.ts",
//!             r#"
//!             import { Provider } from "./inject"
//!             interface Foo {}
//!             interface Bar {}
//!             class BarProvider extends Provider { static provide(): Bar { return {} } }
//!             class FooProvider extends Provider { static provide(bar: Bar): Foo { return bar } }
//!             "#,
//!         ),
//!     ],
//!     DiscoveryOptions::default(),
//! )?;
//!
//! let graph = wirecheck_graph::analyze(&program)?;
//! assert_eq!(graph.build_order(), vec!["BarProvider", "FooProvider"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Type identity
//!
//! Types are compared syntactically by their declaring module and namespace
//! path, e.g. `"src/app".quux.Corge`. There is no type checker: structural
//! compatibility, type aliases and re-exports are not followed.
//!
//! Declarations inside `declare global { .. }` are not recorded. References to
//! them keep their written name (`Clock`), the same key a global from any
//! other file gets.

mod analyzer;
pub mod decl;
pub mod error;
mod lower;
pub mod options;
pub mod program;
mod resolve;

pub use decl::{DeclId, DeclKind};
pub use error::{Result, TsError};
pub use options::DiscoveryOptions;
pub use program::{SourceFile, TsProgram};
