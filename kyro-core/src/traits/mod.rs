//! Network seams of the engine
//!
//! Name resolution and probe transport are traits so that passes can run against
//! scripted implementations in tests. The default implementations go through
//! `kyro_toolbox::ToolboxService`.

mod name_resolver;
mod probe_transport;

pub use name_resolver::{DohResolver, NameResolver};
pub use probe_transport::{NetworkTransport, ProbeTransport};
