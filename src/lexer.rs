use crate::error::SyntaxError;

/// Splits an expression into sub-expression tokens.
///
/// Whitespace only separates tokens at bracket depth zero, so a nested
/// expression such as `name[count rate]` stays a single token no matter how
/// deeply its brackets nest.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Returns the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<String>, SyntaxError> {
        self.skip_whitespace();

        let mut token = String::new();
        let mut depth = 0usize;
        let mut open_at = Vec::new();

        while let Some(ch) = self.current_char() {
            match ch {
                c if c.is_whitespace() && depth == 0 => break,
                '[' => {
                    depth += 1;
                    open_at.push(self.position);
                }
                ']' => {
                    if depth == 0 {
                        return Err(SyntaxError::UnbalancedBracket {
                            position: self.position,
                        });
                    }
                    depth -= 1;
                    open_at.pop();
                }
                _ => {}
            }
            token.push(ch);
            self.advance();
        }

        if let Some(position) = open_at.first() {
            return Err(SyntaxError::UnbalancedBracket {
                position: *position,
            });
        }

        if token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(token))
        }
    }
}

/// Splits `expression` into its top-level sub-expressions.
pub fn tokenize(expression: &str) -> Result<Vec<String>, SyntaxError> {
    let mut lexer = Lexer::new(expression);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }

    if tokens.is_empty() {
        return Err(SyntaxError::EmptyExpression);
    }
    Ok(tokens)
}

#[test]
fn test_brackets_keep_whitespace() {
    let tokens = tokenize("a b[c d] e").unwrap();
    assert_eq!(tokens, vec!["a", "b[c d]", "e"]);
}

#[test]
fn test_unclosed_bracket_reports_opening_position() {
    assert_eq!(
        tokenize("a[b[c]"),
        Err(SyntaxError::UnbalancedBracket { position: 1 })
    );
}
