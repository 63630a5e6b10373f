use crate::error::CliResult;
use colored::Colorize;
use nodesql_translate::{DialectKind, FunctionRegistry, NativeFunction};

pub fn run(dialect: DialectKind) -> CliResult<()> {
    let dialect_impl = dialect.dialect();
    let functions = FunctionRegistry::global().supported_by(dialect_impl.as_ref());
    println!(
        "{} native functions for {}:",
        functions.len(),
        dialect.to_string().bold()
    );
    for function in functions {
        println!("  {}", describe(function));
    }
    Ok(())
}

/// One listing line: IRI, arity and return type.
fn describe(function: &dyn NativeFunction) -> String {
    let arity = match (function.min_args(), function.max_args()) {
        (min, usize::MAX) => format!("{min}.."),
        (min, max) if min == max => min.to_string(),
        (min, max) => format!("{min}..{max}"),
    };
    format!(
        "{} ({arity}) -> {}",
        function.uri(),
        function.return_type()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodesql_vocab::fn_ns::{CONCAT, STRING_LENGTH, SUBSTRING};

    fn describe_uri(uri: &str) -> String {
        describe(FunctionRegistry::global().lookup(uri).unwrap())
    }

    #[test]
    fn test_describe_arity() {
        assert_eq!(
            describe_uri(STRING_LENGTH),
            format!("{STRING_LENGTH} (1) -> INT")
        );
        assert_eq!(
            describe_uri(SUBSTRING),
            format!("{SUBSTRING} (2..3) -> STRING")
        );
        assert_eq!(describe_uri(CONCAT), format!("{CONCAT} (1..) -> STRING"));
    }
}
