/*!
Command dispatcher module.

Directory layout:
  src/cmd/
    mod.rs          (this file: declarations + re-exports)
    scope.rs        (Scope enum + helpers)
    prove.rs        (ProveArgs    + execute_prove)
    detect.rs       (DetectArgs   + execute_detect)
    registry.rs     (RegistryArgs + execute_registry)
    shared.rs       (project/prover resolution, context loading, submit)
    format.rs       (human-output primitives)

Conventions:
  - Each subcommand module exposes exactly one public `execute_*` function
    that returns `anyhow::Result<()>`.
  - Argument structs derive `clap::Args` and are kept minimal.
  - Shared runtime helpers (registry construction, invocation submit) live
    in `shared.rs` and are reused across subcommands.
*/

pub mod detect;
pub mod format;
pub mod prove;
pub mod registry;
pub mod scope;
pub mod shared;

pub use detect::{DetectArgs, execute_detect};
pub use prove::{ProveArgs, execute_prove};
pub use registry::{RegistryArgs, execute_registry};
