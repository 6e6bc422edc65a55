use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

use substring::Substring;

use crate::error::{Error, ScanError};
use crate::literal::Literal;
use crate::token::{Location, Token, Type};

pub struct Scanner<'a> {
    source: &'a str,
    iter: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    column_offset: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner.
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source,
            iter: source.chars().peekmore(),
            tokens: vec!(),
            start: 0,
            current: 0,
            line: 1,
            column_offset: 0,
        }
    }

    /// Scans the source code and returns a vector of tokens.
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(
            Token::new(
                Type::EOF,
                String::from(""),
                None,
                Location::new(self.line, self.current - self.column_offset + 1),
            )
        );

        self.tokens.clone()
    }

    /// Consumes and returns the next character.
    fn advance(&mut self) -> char {
        match self.iter.next() {
            Some(char) => {
                self.current += 1;
                char
            },
            None => panic!("tried to advance past end of the file."),
        }
    }

    /// Returns the next character without consuming it.
    /// A NUL byte stands in for the end of the file.
    fn peek(&mut self) -> char {
        self.iter.peek().copied().unwrap_or('\0')
    }

    /// Returns the next next character without consuming it.
    fn peek_next(&mut self) -> char {
        self.iter.peek_nth(1).copied().unwrap_or('\0')
    }

    /// Returns if the character after the next one is the expected character.
    fn match_next(&mut self, expected: char) -> bool {
        self.peek_next() == expected
    }

    /// Returns if the scanner has reached the end of the file.
    fn is_at_end(&mut self) -> bool {
        self.iter.peek().is_none()
    }

    /// The current location, anchored at the start of the token being scanned.
    fn location(&self) -> Location {
        Location::new(self.line, self.start - self.column_offset + 1)
    }

    /// Adds a new token to the list of tokens.
    fn add_token(&mut self, r#type: Type, lexeme: String, literal: Option<Literal>) {
        let location = self.location();
        self.add_token_at(r#type, lexeme, literal, location);
    }

    /// Adds a new token at an explicit location.
    /// Multi-line strings advance the line counter mid-token and need this.
    fn add_token_at(&mut self, r#type: Type, lexeme: String, literal: Option<Literal>, location: Location) {
        self.tokens.push(Token::new(r#type, lexeme, literal, location));
    }

    /// Adds a new single char token to the list of tokens.
    fn add_single_char_token(&mut self, r#type: Type) {
        let c = self.advance();
        self.add_token(r#type, c.to_string(), None);
    }

    /// Adds a new double char token to the list of tokens.
    fn add_double_char_token(&mut self, r#type: Type) {
        let first = self.advance();
        let second = self.advance();

        self.add_token(r#type, format!("{first}{second}"), None);
    }

    /// Handles a string literal.
    fn string(&mut self) {
        let location = self.location();
        self.advance(); // Move past the starting double quotes.

        while !self.is_at_end() && self.peek() != '"' {
            if self.advance() == '\n' {
                self.line += 1;
                self.column_offset = self.current;
            }
        }

        if self.is_at_end() {
            ScanError {
                location,
                message: String::from("Unterminated string"),
            }.throw();
            return;
        }

        self.advance(); // Move past the closing double quotes.

        // Literal does not include the double quotes unlike the lexeme.
        let value = self.source.substring(self.start + 1, self.current - 1).to_string();
        self.add_token_at(Type::String, value.clone(), Some(Literal::String(value)), location);
    }

    /// Handles a number literal.
    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // A dot is only part of the number if digits follow it. A trailing
        // dot is left to be scanned as its own token.
        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // Consume the dot.

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let value = self.source.substring(self.start, self.current).to_string();
        let number: f64 = value.parse().unwrap();

        self.add_token(Type::Number, value, Some(Literal::Number(number)));
    }

    /// Handles an identifier or a keyword.
    fn identifier(&mut self) {
        while matches!(self.peek(), c if c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }

        let value = self.source.substring(self.start, self.current).to_string();
        let token_type = match value.as_str() {
            "and"      => Type::And,
            "class"    => Type::Class,
            "else"     => Type::Else,
            "false"    => Type::False,
            "for"      => Type::For,
            "fun"      => Type::Fun,
            "if"       => Type::If,
            "nil"      => Type::Nil,
            "or"       => Type::Or,
            "print"    => Type::Print,
            "return"   => Type::Return,
            "super"    => Type::Super,
            "this"     => Type::This,
            "true"     => Type::True,
            "var"      => Type::Var,
            "while"    => Type::While,
            _          => Type::Identifier,
        };

        self.add_token(token_type, value, None);
    }

    /// Scans the next token.
    fn scan_token(&mut self) {
        let c = self.peek();
        match c {
            // One character tokens
            '(' => self.add_single_char_token(Type::LeftParen),
            ')' => self.add_single_char_token(Type::RightParen),
            '{' => self.add_single_char_token(Type::LeftBrace),
            '}' => self.add_single_char_token(Type::RightBrace),
            ',' => self.add_single_char_token(Type::Comma),
            '.' => self.add_single_char_token(Type::Dot),
            '-' => self.add_single_char_token(Type::Minus),
            '+' => self.add_single_char_token(Type::Plus),
            ';' => self.add_single_char_token(Type::Semicolon),
            '*' => self.add_single_char_token(Type::Star),

            // Two character tokens
            '!' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::BangEqual);
                } else {
                    self.add_single_char_token(Type::Bang)
                };
            },
            '=' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::EqualEqual);
                } else {
                    self.add_single_char_token(Type::Equal)
                };
            },
            '<' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::LessEqual);
                } else {
                    self.add_single_char_token(Type::Less)
                };
            },
            '>' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::GreaterEqual);
                } else {
                    self.add_single_char_token(Type::Greater)
                };
            },
            '/' => {
                if self.match_next('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_single_char_token(Type::Slash);
                }
            },

            // Ignore whitespace
            ' ' | '\r' | '\t' => {
                self.advance();
            },

            // Update line counter
            '\n' => {
                self.advance();

                self.line += 1;
                self.column_offset = self.current;
            },

            // String
            '"' => self.string(),

            // Numbers
            c if c.is_ascii_digit() => self.number(),

            // Identifiers
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

            _ => {
                self.advance();

                ScanError {
                    location: self.location(),
                    message: format!("Unexpected character '{c}'"),
                }.throw();
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn scan(source: &str) -> Vec<Token> {
        Scanner::new(source).scan_tokens()
    }

    #[test]
    fn scan_single_char_tokens() {
        let tokens = scan("(){},.-+;*/");
        let types: Vec<Type> = tokens.iter().map(|token| token.r#type).collect();

        assert_eq!(types, vec![
            Type::LeftParen, Type::RightParen, Type::LeftBrace, Type::RightBrace,
            Type::Comma, Type::Dot, Type::Minus, Type::Plus, Type::Semicolon,
            Type::Star, Type::Slash, Type::EOF,
        ]);
    }

    #[test]
    fn scan_double_char_tokens() {
        let tokens = scan("! != = == < <= > >=");
        let types: Vec<Type> = tokens.iter().map(|token| token.r#type).collect();

        assert_eq!(types, vec![
            Type::Bang, Type::BangEqual, Type::Equal, Type::EqualEqual,
            Type::Less, Type::LessEqual, Type::Greater, Type::GreaterEqual,
            Type::EOF,
        ]);
    }

    #[test]
    fn scan_keywords_and_identifiers() {
        let tokens = scan("var language = nil;");

        assert_eq!(tokens[0].r#type, Type::Var);
        assert_eq!(tokens[1].r#type, Type::Identifier);
        assert_eq!(tokens[1].lexeme, "language");
        assert_eq!(tokens[2].r#type, Type::Equal);
        assert_eq!(tokens[3].r#type, Type::Nil);
        assert_eq!(tokens[4].r#type, Type::Semicolon);
    }

    #[test]
    fn scan_number_literals() {
        let tokens = scan("123 45.67");

        assert_eq!(tokens[0].literal, Some(Literal::Number(123.0)));
        assert_eq!(tokens[1].literal, Some(Literal::Number(45.67)));
    }

    #[test]
    fn scan_number_with_trailing_dot() {
        let tokens = scan("123.");
        let types: Vec<Type> = tokens.iter().map(|token| token.r#type).collect();

        assert_eq!(types, vec![Type::Number, Type::Dot, Type::EOF]);
        assert_eq!(tokens[0].literal, Some(Literal::Number(123.0)));
    }

    #[test]
    fn scan_string_literal() {
        let tokens = scan("\"hello\"");

        assert_eq!(tokens[0].r#type, Type::String);
        assert_eq!(tokens[0].literal, Some(Literal::String(String::from("hello"))));
    }

    #[test]
    fn scan_multiline_string_updates_line() {
        let tokens = scan("\"1\n2\"\nident");

        assert_eq!(tokens[0].literal, Some(Literal::String(String::from("1\n2"))));
        assert_eq!(tokens[0].location.line, 1);
        assert_eq!(tokens[1].location.line, 3);
        assert_eq!(tokens[1].location.column, 1);
    }

    #[test]
    fn scan_comment_until_newline() {
        let tokens = scan("// a comment\nident");
        let types: Vec<Type> = tokens.iter().map(|token| token.r#type).collect();

        assert_eq!(types, vec![Type::Identifier, Type::EOF]);
        assert_eq!(tokens[0].location.line, 2);
    }

    #[test]
    fn scan_locations_are_one_based() {
        let tokens = scan("a b\n  c");

        assert_eq!(tokens[0].location, Location::new(1, 1));
        assert_eq!(tokens[1].location, Location::new(1, 3));
        assert_eq!(tokens[2].location, Location::new(2, 3));
    }
}
