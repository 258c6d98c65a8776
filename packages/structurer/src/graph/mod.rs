//! Property graph commands.
//!
//! The structurer never talks to a graph store. It compiles documents into
//! [`GraphCommand`] values whose `Display` form is Cypher, and leaves their
//! execution to whatever runs the script.

mod command;
mod compiler;

pub use command::{escape, render_script, GraphCommand, PropertyValue, NEXT_RELATION, PART_OF_RELATION};
pub use compiler::{compile_corpus, compile_document, compile_unit, corpus_epilogue, corpus_prologue};
