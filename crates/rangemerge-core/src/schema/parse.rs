//! Parser for the two DDL statement shapes in `Statement`.
//! Keywords and unquoted identifiers fold to lowercase; quoted identifiers
//! are not supported.

use crate::{
    error::InternalError,
    schema::{AggregateDefinition, AggregateSignature, QualifiedName, Statement},
    types::RangeType,
};
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Token {
    Word(String),
    LParen,
    RParen,
    Comma,
    Equals,
    Semicolon,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(word) => f.write_str(word),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::Comma => f.write_str(","),
            Self::Equals => f.write_str("="),
            Self::Semicolon => f.write_str(";"),
        }
    }
}

fn syntax_error(token: Option<&Token>) -> InternalError {
    match token {
        Some(token) => InternalError::schema_unsupported(format!(
            "syntax error at or near \"{token}\""
        )),
        None => InternalError::schema_unsupported("syntax error at end of input"),
    }
}

const fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '.'
}

fn tokenize(sql: &str) -> Result<Vec<Token>, InternalError> {
    let mut tokens = Vec::new();
    let mut chars = sql.chars().peekable();

    while let Some(&ch) = chars.peek() {
        let token = match ch {
            _ if ch.is_whitespace() => {
                chars.next();
                continue;
            }
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            '=' => Token::Equals,
            ';' => Token::Semicolon,
            _ if is_word_char(ch) => {
                let mut word = String::new();
                while let Some(&ch) = chars.peek().filter(|ch| is_word_char(**ch)) {
                    word.push(ch.to_ascii_lowercase());
                    chars.next();
                }
                tokens.push(Token::Word(word));
                continue;
            }
            _ => {
                return Err(InternalError::schema_unsupported(format!(
                    "syntax error at or near \"{ch}\""
                )));
            }
        };

        chars.next();
        tokens.push(token);
    }

    Ok(tokens)
}

///
/// Parser
///

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    const fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token) -> Result<(), InternalError> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(syntax_error(self.peek()))
        }
    }

    fn word(&mut self) -> Result<String, InternalError> {
        match self.peek() {
            Some(Token::Word(word)) => {
                let word = word.clone();
                self.pos += 1;
                Ok(word)
            }
            other => Err(syntax_error(other)),
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if matches!(self.peek(), Some(Token::Word(word)) if word == keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn keyword(&mut self, keyword: &str) -> Result<(), InternalError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(syntax_error(self.peek()))
        }
    }

    fn qualified_name(&mut self) -> Result<QualifiedName, InternalError> {
        let word = self.word()?;
        let name = match word.split_once('.') {
            Some((schema, name)) => QualifiedName::new(name).with_schema(schema),
            None => QualifiedName::new(word),
        };
        name.validate()?;

        Ok(name)
    }

    fn range_type(&mut self) -> Result<RangeType, InternalError> {
        let word = self.word()?;

        word.parse().map_err(|_| {
            InternalError::schema_unsupported(format!("type \"{word}\" does not exist"))
        })
    }

    // `(<range type>)`
    fn argument_list(&mut self) -> Result<RangeType, InternalError> {
        self.expect(&Token::LParen)?;
        let arg_type = self.range_type()?;
        self.expect(&Token::RParen)?;

        Ok(arg_type)
    }

    fn finish(&mut self) -> Result<(), InternalError> {
        self.eat_semicolon();
        match self.peek() {
            None => Ok(()),
            other => Err(syntax_error(other)),
        }
    }

    fn eat_semicolon(&mut self) {
        if self.peek() == Some(&Token::Semicolon) {
            self.pos += 1;
        }
    }

    fn create_aggregate(&mut self) -> Result<Statement, InternalError> {
        let or_replace = if self.eat_keyword("or") {
            self.keyword("replace")?;
            true
        } else {
            false
        };
        self.keyword("aggregate")?;

        let name = self.qualified_name()?;
        let arg_type = self.argument_list()?;

        self.expect(&Token::LParen)?;
        let mut sfunc = None;
        let mut stype = None;
        loop {
            let attribute = self.word()?;
            self.expect(&Token::Equals)?;
            match attribute.as_str() {
                "sfunc" => sfunc = Some(self.word()?),
                "stype" => stype = Some(self.range_type()?),
                other => {
                    return Err(InternalError::schema_unsupported(format!(
                        "aggregate attribute \"{other}\" not recognized"
                    )));
                }
            }

            match self.advance() {
                Some(Token::Comma) => {}
                Some(Token::RParen) => break,
                other => return Err(syntax_error(other.as_ref())),
            }
        }

        let definition = AggregateDefinition {
            name,
            arg_type,
            sfunc: sfunc
                .ok_or_else(|| InternalError::schema_invalid("aggregate sfunc must be specified"))?,
            stype: stype
                .ok_or_else(|| InternalError::schema_invalid("aggregate stype must be specified"))?,
        };
        definition.validate()?;

        Ok(Statement::CreateAggregate {
            or_replace,
            definition,
        })
    }

    fn drop_aggregate(&mut self) -> Result<Statement, InternalError> {
        self.keyword("aggregate")?;
        let if_exists = if self.eat_keyword("if") {
            self.keyword("exists")?;
            true
        } else {
            false
        };

        let name = self.qualified_name()?;
        let arg_type = self.argument_list()?;

        Ok(Statement::DropAggregate {
            if_exists,
            signature: AggregateSignature { name, arg_type },
        })
    }
}

pub(super) fn parse_statement(sql: &str) -> Result<Statement, InternalError> {
    let mut parser = Parser::new(tokenize(sql)?);

    let statement = match parser.word()?.as_str() {
        "create" => parser.create_aggregate()?,
        "drop" => parser.drop_aggregate()?,
        other => {
            return Err(InternalError::schema_unsupported(format!(
                "unsupported statement \"{other}\""
            )));
        }
    };
    parser.finish()?;

    Ok(statement)
}
