use crate::error::QueryError;
use std::fmt;

/// A validated query token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    And,
    Or,
    Word(String),
}

impl Token {
    fn classify(s: &str) -> Self {
        match s {
            "and" => Token::And,
            "or" => Token::Or,
            w => Token::Word(w.to_string()),
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Token::And | Token::Or)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Token::And => "and",
            Token::Or => "or",
            Token::Word(w) => w,
        }
    }
}

/// A query that passed validation: non-empty, letters only, and operators
/// never first, last, or next to each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    tokens: Vec<Token>,
}

fn is_posix_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0b' | '\x0c')
}

impl Query {
    /// Lowercase `line`, split it on whitespace and validate the tokens.
    pub fn parse(line: &str) -> Result<Self, QueryError> {
        let line = line.to_ascii_lowercase();
        let raw: Vec<&str> = line.split(is_posix_space).filter(|s| !s.is_empty()).collect();

        let (first, last) = match (raw.first(), raw.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return Err(QueryError::Empty),
        };
        if let Some(bad) = raw.iter().flat_map(|t| t.chars()).find(|c| !c.is_ascii_alphabetic()) {
            return Err(QueryError::BadCharacter(bad));
        }

        let tokens: Vec<Token> = raw.iter().map(|t| Token::classify(t)).collect();
        if tokens[0].is_operator() {
            return Err(QueryError::LeadingOperator(first.to_string()));
        }
        if tokens[tokens.len() - 1].is_operator() {
            return Err(QueryError::TrailingOperator(last.to_string()));
        }
        if let Some(pair) = tokens.windows(2).find(|w| w[0].is_operator() && w[1].is_operator()) {
            return Err(QueryError::AdjacentOperators(pair[0].as_str().into(), pair[1].as_str().into()));
        }
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[Token] { &self.tokens }
}

/// The normalized query, words separated by single spaces.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(token.as_str())?;
        }
        Ok(())
    }
}
