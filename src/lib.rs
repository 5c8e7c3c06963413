pub mod ast;
pub mod cli;
pub mod error;
pub mod evaluator;
pub mod inflect;
pub mod lexer;
pub mod merge;
pub mod node;
pub mod output;
pub mod parser;
pub mod response;

pub use ast::{AggType, Expression, Shape, SubAgg};
pub use error::{AggError, AggResult, LookupError, SyntaxError};
pub use evaluator::{AccessOptions, Flattener, evaluate};
pub use lexer::{Lexer, tokenize};
pub use node::{AggNode, Bucket};
pub use output::{to_json, to_json_pretty, to_ndjson};
pub use parser::{Parser, parse_expression, parse_sub_agg};
pub use response::SearchResponse;
