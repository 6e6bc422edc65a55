use crate::error::{Error, ParseError};
use crate::expr::*;
use crate::literal::Literal;
use crate::stmt::*;
use crate::token::{Token, Type};

type ParseResult<T> = Result<T, ParseError>;

/// Operator sets for the binary expression ladder, loosest tier first:
/// equality, then comparison, then terms, then factors. All of them are
/// left-associative, so one folded production covers the four rules.
const BINARY_TIERS: [&[Type]; 4] = [
    &[Type::BangEqual, Type::EqualEqual],
    &[Type::Greater, Type::GreaterEqual, Type::Less, Type::LessEqual],
    &[Type::Minus, Type::Plus],
    &[Type::Slash, Type::Star],
];

/// The short-circuiting tiers sit between assignment and the binary ladder.
const LOGICAL_TIERS: [Type; 2] = [Type::Or, Type::And];

/// Hard limit on call arguments and function parameters.
const MAX_ARITY: usize = 255;

/// Recursive descent parser over the scanner's token stream.
///
/// Each grammar rule is one method. The expression precedence ladder runs
/// `assignment -> logical -> binary -> unary -> call -> primary`, with the
/// logical and binary rules driven by the tier tables above rather than one
/// method per precedence level.
///
/// A parse error inside a declaration is reported, the parser skips ahead to
/// the next statement boundary and keeps going, so a single run can surface
/// several errors. `parse` returns every statement that could still be
/// recovered; it never propagates an error to the caller.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            current: 0,
        }
    }

    /// Parses the tokens and returns the resulting statements.
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();

        while !self.at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }

        statements
    }

    /// Returns the next token without consuming it.
    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Returns the most recently consumed token.
    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    /// Returns if the parser has reached the end of the token stream.
    fn at_end(&self) -> bool {
        self.peek().r#type == Type::EOF
    }

    /// Returns if the next token is of the given type.
    fn check(&self, r#type: Type) -> bool {
        !self.at_end() && self.peek().r#type == r#type
    }

    /// Consumes the next token and returns it.
    fn advance(&mut self) -> &Token {
        if !self.at_end() {
            self.current += 1;
        }

        self.previous()
    }

    /// Consumes and returns the next token only if it has the given type.
    fn take(&mut self, r#type: Type) -> Option<Token> {
        if self.check(r#type) {
            return Some(self.advance().clone());
        }

        None
    }

    /// Consumes and returns the next token only if its type is in the set.
    fn take_any(&mut self, types: &[Type]) -> Option<Token> {
        if types.iter().any(|r#type| self.check(*r#type)) {
            return Some(self.advance().clone());
        }

        None
    }

    /// Consumes the next token, failing if it does not have the given type.
    /// The error carries the offending token itself, so diagnostics point at
    /// what was found rather than at whatever came before it.
    fn consume(&mut self, r#type: Type, message: &str) -> ParseResult<Token> {
        match self.take(r#type) {
            Some(token) => Ok(token),
            None => Err(ParseError {
                token: self.peek().clone(),
                message: message.to_string(),
            }),
        }
    }

    /// declaration -> class_declaration | function | var_declaration | statement ;
    ///
    /// This is the error recovery point: a failed declaration is reported
    /// and swallowed here after synchronizing to a statement boundary.
    fn declaration(&mut self) -> Option<Stmt> {
        let statement = match self.peek().r#type {
            Type::Class => {
                self.advance();
                self.class_declaration()
            },
            Type::Fun => {
                self.advance();
                self.function("function")
            },
            Type::Var => {
                self.advance();
                self.var_declaration()
            },
            _ => self.statement(),
        };

        match statement {
            Ok(statement) => Some(statement),
            Err(error) => {
                error.throw();
                self.synchronize();
                None
            },
        }
    }

    /// class_declaration -> "class" IDENTIFIER ( "<" IDENTIFIER )? "{" function* "}" ;
    ///
    /// The superclass is restricted to a bare identifier, kept as a
    /// `Variable` expression so the resolver and evaluator treat it like
    /// any other name.
    fn class_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expected class name")?;

        let superclass = match self.take(Type::Less) {
            Some(_) => {
                let name = self.consume(Type::Identifier, "Expected superclass name")?;
                Some(Expr::Variable(VariableData { name }))
            },
            None => None,
        };

        self.consume(Type::LeftBrace, "Expected '{' before class body")?;

        let mut methods = Vec::new();
        while !self.check(Type::RightBrace) && !self.at_end() {
            methods.push(self.function("method")?);
        }

        self.consume(Type::RightBrace, "Expected '}' after class body")?;

        Ok(Stmt::Class(ClassData { name, superclass, methods }))
    }

    /// function -> IDENTIFIER "(" ( IDENTIFIER ( "," IDENTIFIER )* )? ")" block ;
    ///
    /// Shared by named functions and methods; `kind` only flavors the
    /// error messages. Going past the parameter limit is reported but does
    /// not unwind, matching the argument limit below.
    fn function(&mut self, kind: &str) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, &format!("Expected {kind} name"))?;

        self.consume(Type::LeftParen, &format!("Expected '(' after {kind} name"))?;

        let mut params = Vec::new();
        if !self.check(Type::RightParen) {
            loop {
                if params.len() >= MAX_ARITY {
                    ParseError {
                        token: self.peek().clone(),
                        message: "Cannot have more than 255 parameters".to_string(),
                    }.throw();
                }

                params.push(self.consume(Type::Identifier, "Expected parameter name")?);

                if self.take(Type::Comma).is_none() {
                    break;
                }
            }
        }
        self.consume(Type::RightParen, "Expected ')' after parameters")?;

        self.consume(Type::LeftBrace, &format!("Expected '{{' before {kind} body"))?;
        let body = self.block()?;

        Ok(Stmt::Function(FunctionData { name, params, body }))
    }

    /// var_declaration -> "var" IDENTIFIER ( "=" expression )? ";" ;
    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expected variable name")?;

        let initializer = match self.take(Type::Equal) {
            Some(_) => Some(self.expression()?),
            None => None,
        };

        self.consume(Type::Semicolon, "Expected ';' after variable declaration")?;

        Ok(Stmt::Var(VarData { name, initializer }))
    }

    /// statement -> for | if | print | return | while | block | expression_statement ;
    fn statement(&mut self) -> ParseResult<Stmt> {
        match self.peek().r#type {
            Type::For => {
                self.advance();
                self.for_statement()
            },
            Type::If => {
                self.advance();
                self.if_statement()
            },
            Type::Print => {
                self.advance();
                self.print_statement()
            },
            Type::Return => {
                self.advance();
                self.return_statement()
            },
            Type::While => {
                self.advance();
                self.while_statement()
            },
            Type::LeftBrace => {
                self.advance();
                Ok(Stmt::Block(BlockData { statements: self.block()? }))
            },
            _ => self.expression_statement(),
        }
    }

    /// block -> "{" declaration* "}" ;
    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(Type::RightBrace) && !self.at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }

        self.consume(Type::RightBrace, "Expected '}' after block")?;

        Ok(statements)
    }

    /// for -> "for" "(" ( var_declaration | expression_statement | ";" )
    ///        expression? ";" expression? ")" statement ;
    ///
    /// There is no for node in the AST. The clauses desugar into
    /// `{ init; while (cond) { body; incr; } }`, where a missing condition
    /// becomes literal `true`.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expected '(' after 'for'")?;

        let initializer = match self.peek().r#type {
            Type::Semicolon => {
                self.advance();
                None
            },
            Type::Var => {
                self.advance();
                Some(self.var_declaration()?)
            },
            _ => Some(self.expression_statement()?),
        };

        let condition = match self.check(Type::Semicolon) {
            true => Expr::Literal(Literal::Bool(true)),
            false => self.expression()?,
        };
        self.consume(Type::Semicolon, "Expected ';' after loop condition")?;

        let increment = match self.check(Type::RightParen) {
            true => None,
            false => Some(self.expression()?),
        };
        self.consume(Type::RightParen, "Expected ')' after loop clauses")?;

        let mut body = self.statement()?;

        // The increment runs after the body, inside the loop.
        if let Some(increment) = increment {
            body = Stmt::Block(BlockData {
                statements: vec![
                    body,
                    Stmt::Expression(ExpressionData { expr: increment }),
                ],
            });
        }

        body = Stmt::While(WhileData { condition, body: Box::new(body) });

        // The initializer runs once, in a scope that outlives the loop.
        if let Some(initializer) = initializer {
            body = Stmt::Block(BlockData { statements: vec![initializer, body] });
        }

        Ok(body)
    }

    /// if -> "if" "(" expression ")" statement ( "else" statement )? ;
    ///
    /// The else binds to the nearest if.
    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expected '(' after 'if'")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expected ')' after if condition")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = match self.take(Type::Else) {
            Some(_) => Some(Box::new(self.statement()?)),
            None => None,
        };

        Ok(Stmt::If(IfData { condition, then_branch, else_branch }))
    }

    /// print -> "print" expression ";" ;
    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(Type::Semicolon, "Expected ';' after value")?;

        Ok(Stmt::Print(PrintData { expr }))
    }

    /// return -> "return" expression? ";" ;
    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();

        let value = match self.check(Type::Semicolon) {
            true => None,
            false => Some(self.expression()?),
        };

        self.consume(Type::Semicolon, "Expected ';' after return value")?;

        Ok(Stmt::Return(ReturnData { keyword, value }))
    }

    /// while -> "while" "(" expression ")" statement ;
    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expected '(' after 'while'")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expected ')' after condition")?;

        let body = Box::new(self.statement()?);

        Ok(Stmt::While(WhileData { condition, body }))
    }

    /// expression_statement -> expression ";" ;
    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(Type::Semicolon, "Expected ';' after expression")?;

        Ok(Stmt::Expression(ExpressionData { expr }))
    }

    /// expression -> assignment ;
    fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    /// assignment -> ( call "." )? IDENTIFIER "=" assignment | logical ;
    ///
    /// The target is parsed as an ordinary expression first; only once the
    /// `=` shows up is it checked for being assignable. A variable becomes
    /// an assignment, a property access becomes a property set, and
    /// anything else is reported without unwinding, since the right-hand
    /// side has already been consumed by then.
    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.logical(0)?;

        let Some(equals) = self.take(Type::Equal) else {
            return Ok(expr);
        };

        let value = Box::new(self.assignment()?);

        match expr {
            Expr::Variable(data) => Ok(Expr::Assign(AssignData { name: data.name, value })),
            Expr::Get(data) => Ok(Expr::Set(SetData {
                object: data.object,
                name: data.name,
                value,
            })),
            expr => {
                ParseError {
                    token: equals,
                    message: "Invalid assignment target".to_string(),
                }.throw();

                Ok(expr)
            },
        }
    }

    /// logical -> next ( ("or" | "and") next )* ;
    ///
    /// One tier per operator: `or` binds looser than `and`, which binds
    /// looser than the binary ladder.
    fn logical(&mut self, tier: usize) -> ParseResult<Expr> {
        if tier == LOGICAL_TIERS.len() {
            return self.binary(0);
        }

        let mut expr = self.logical(tier + 1)?;

        while let Some(operator) = self.take(LOGICAL_TIERS[tier]) {
            let right = self.logical(tier + 1)?;
            expr = Expr::Logical(LogicalData {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }

        Ok(expr)
    }

    /// binary -> next ( tier_operator next )* ;
    ///
    /// Covers equality, comparison, term and factor in one production,
    /// recursing into the next-tighter tier per `BINARY_TIERS`.
    fn binary(&mut self, tier: usize) -> ParseResult<Expr> {
        if tier == BINARY_TIERS.len() {
            return self.unary();
        }

        let mut expr = self.binary(tier + 1)?;

        while let Some(operator) = self.take_any(BINARY_TIERS[tier]) {
            let right = self.binary(tier + 1)?;
            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }

        Ok(expr)
    }

    /// unary -> ( "!" | "-" ) unary | call ;
    fn unary(&mut self) -> ParseResult<Expr> {
        match self.take_any(&[Type::Bang, Type::Minus]) {
            Some(operator) => {
                let expr = Box::new(self.unary()?);
                Ok(Expr::Unary(UnaryData { operator, expr }))
            },
            None => self.call(),
        }
    }

    /// call -> primary ( "(" arguments? ")" | "." IDENTIFIER )* ;
    ///
    /// Calls and property accesses chain left-to-right off one primary.
    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            expr = if self.take(Type::LeftParen).is_some() {
                self.finish_call(expr)?
            } else if self.take(Type::Dot).is_some() {
                let name = self.consume(Type::Identifier, "Expected property name after '.'")?;
                Expr::Get(GetData { object: Box::new(expr), name })
            } else {
                return Ok(expr);
            };
        }
    }

    /// arguments -> expression ( "," expression )* ;
    ///
    /// The closing parenthesis is kept on the call node so runtime errors
    /// can point at the call site.
    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = Vec::new();

        if !self.check(Type::RightParen) {
            loop {
                if arguments.len() >= MAX_ARITY {
                    ParseError {
                        token: self.peek().clone(),
                        message: "Cannot have more than 255 arguments".to_string(),
                    }.throw();
                }

                arguments.push(self.expression()?);

                if self.take(Type::Comma).is_none() {
                    break;
                }
            }
        }

        let paren = self.consume(Type::RightParen, "Expected ')' after arguments")?;

        Ok(Expr::Call(CallData { callee: Box::new(callee), paren, arguments }))
    }

    /// primary -> NUMBER | STRING | "true" | "false" | "nil" | "this"
    ///          | "super" "." IDENTIFIER | IDENTIFIER | "(" expression ")" ;
    fn primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();

        match token.r#type {
            Type::False => {
                self.advance();
                Ok(Expr::Literal(Literal::Bool(false)))
            },
            Type::True => {
                self.advance();
                Ok(Expr::Literal(Literal::Bool(true)))
            },
            Type::Nil => {
                self.advance();
                Ok(Expr::Literal(Literal::Nil))
            },
            Type::Number | Type::String => {
                self.advance();
                Ok(Expr::Literal(token.literal.expect("number or string to have a literal value")))
            },
            Type::Super => {
                self.advance();
                self.consume(Type::Dot, "Expected '.' after 'super'")?;
                let method = self.consume(Type::Identifier, "Expected superclass method name")?;

                Ok(Expr::Super(SuperData { keyword: token, method }))
            },
            Type::This => {
                self.advance();
                Ok(Expr::This(ThisData { keyword: token }))
            },
            Type::Identifier => {
                self.advance();
                Ok(Expr::Variable(VariableData { name: token }))
            },
            Type::LeftParen => {
                self.advance();
                let expr = Box::new(self.expression()?);
                self.consume(Type::RightParen, "Expected ')' after expression")?;

                Ok(Expr::Grouping(GroupingData { expr }))
            },
            _ => Err(ParseError {
                token,
                message: "Expected expression".to_string(),
            }),
        }
    }

    /// Discards tokens until the next statement boundary: just past a
    /// semicolon, or right before a keyword that can start a statement.
    fn synchronize(&mut self) {
        self.advance();

        while !self.at_end() {
            if self.previous().r#type == Type::Semicolon {
                return;
            }

            match self.peek().r#type {
                Type::Class | Type::Fun | Type::Var | Type::For
                | Type::If | Type::While | Type::Print | Type::Return => return,
                _ => {
                    self.advance();
                },
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scanner::Scanner;

    fn parse(source: &str) -> Vec<Stmt> {
        let tokens = Scanner::new(source).scan_tokens();
        Parser::new(tokens).parse()
    }

    fn first_expr(source: &str) -> Expr {
        match parse(source).remove(0) {
            Stmt::Expression(data) => data.expr,
            statement => panic!("expected an expression statement, got {statement:?}"),
        }
    }

    #[test]
    fn binary_tiers_are_left_associative() {
        let Expr::Binary(outer) = first_expr("1 - 2 - 3;") else { panic!() };
        assert_eq!(outer.operator.lexeme, "-");
        assert!(matches!(*outer.left, Expr::Binary(_)));
        assert!(matches!(*outer.right, Expr::Literal(Literal::Number(_))));
    }

    #[test]
    fn comparison_binds_tighter_than_equality() {
        let Expr::Binary(outer) = first_expr("1 == 2 < 3;") else { panic!() };
        assert_eq!(outer.operator.r#type, Type::EqualEqual);
        assert!(matches!(*outer.right, Expr::Binary(_)));
    }

    #[test]
    fn or_binds_looser_than_and() {
        let Expr::Logical(outer) = first_expr("1 or 2 and 3;") else { panic!() };
        assert_eq!(outer.operator.r#type, Type::Or);
        assert!(matches!(*outer.right, Expr::Logical(_)));
    }

    #[test]
    fn assignment_is_right_associative() {
        let Expr::Assign(outer) = first_expr("a = b = 1;") else { panic!() };
        assert_eq!(outer.name.lexeme, "a");
        assert!(matches!(*outer.value, Expr::Assign(_)));
    }

    #[test]
    fn property_assignment_becomes_set() {
        let Expr::Set(set) = first_expr("a.b = 1;") else { panic!() };
        assert_eq!(set.name.lexeme, "b");
        assert!(matches!(*set.object, Expr::Variable(_)));
    }

    #[test]
    fn call_chains_off_one_primary() {
        let Expr::Call(call) = first_expr("a.b(1)(2);") else { panic!() };
        assert_eq!(call.arguments.len(), 1);
        assert!(matches!(*call.callee, Expr::Call(_)));
    }

    #[test]
    fn for_desugars_into_while() {
        let Stmt::Block(block) = parse("for (var i = 0; i < 3; i = i + 1) print i;").remove(0)
            else { panic!() };

        assert!(matches!(block.statements[0], Stmt::Var(_)));
        let Stmt::While(while_stmt) = &block.statements[1] else { panic!() };
        assert!(matches!(*while_stmt.body, Stmt::Block(_)));
    }

    #[test]
    fn for_without_condition_loops_on_true() {
        let Stmt::While(while_stmt) = parse("for (;;) {}").remove(0) else { panic!() };
        assert_eq!(while_stmt.condition, Expr::Literal(Literal::Bool(true)));
    }
}
