//! Interpretation of parsed trees
//!
//!     Interpretation turns a tree into a [`FragmentList`]: prose stays text, commands are
//!     replaced by whatever the function behind their phrase returns. What a phrase means is
//!     entirely up to the [`Environment`]; paxter itself only brings a default phrase evaluator
//!     and two control-flow commands (`if` and `for`).
//!
//!         - [`value`]: runtime values and the callable types
//!         - [`environment`]: the name to value map, with its reserved keys
//!         - [`fragments`]: fragment lists and their flattening
//!         - [`interpreter`]: the tree walk
//!         - [`wrappers`]: Direct, Normal and NormalWithEnv call-wrappers
//!         - [`phrase`]: the default phrase evaluator
//!         - [`controls`]: `if` and `for`
//!
//!     Interpretation is single threaded and sequential. Commands are visited in source order,
//!     so functions mutating the environment see each other's effects in that order.

pub mod controls;
pub mod environment;
pub mod fragments;
pub mod interpreter;
pub mod phrase;
pub mod value;
pub mod wrappers;

pub use environment::{Environment, EXTRAS_KEY, PHRASE_EVAL_KEY, SYMBOLS_KEY};
pub use fragments::FragmentList;
pub use interpreter::{interpret, Interpreter};
pub use value::{Arguments, CallResult, DirectFn, NativeEnvFn, NativeFn, PhraseEvalFn, Value};
pub use wrappers::CallWrapper;
