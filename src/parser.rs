/*!
Recursive‑descent parser for Sprig
==================================

Consumes the token slice produced by [`crate::scanner::Scanner`] and builds the
owned AST in [`crate::ast`]. One parsing function per grammar rule; every token
is consumed once, so the whole pass is **Θ(n)** in the number of tokens. Call
depth grows with syntactic nesting only.

### Logging Policy

| Location                     | Level  | Purpose                                   |
|------------------------------|--------|-------------------------------------------|
| `Parser::new`, `parse`       | `info` | Lifecycle milestones.                     |
| `declaration`, blocks        | `debug`| High‑level descent into grammar branches. |

The first error aborts the parse. Nesting of blocks, parentheses and unary
operators is capped at [`MAX_NESTING`] levels so that hostile input fails with a
`ParseError` instead of exhausting the stack.

--------------------------------------------------------------------------------
Grammar (EBNF)
--------------

```text
program        → NEWLINE* ( declaration NEWLINE* )* EOF ;
declaration    → funDecl | ifStmt | whileStmt | forStmt | simpleStmt ;
funDecl        → "def" IDENT "(" parameters? ")" ":" body ;
ifStmt         → "if" expression ":" body
                 ( "elif" expression ":" body )*
                 ( "else" ":" body )? ;
whileStmt      → "while" expression ":" body ;
forStmt        → "for" IDENT "in" expression ( "step" expression )? ":" body ;
simpleStmt     → varDecl | printStmt | returnStmt | exprStmt ;
varDecl        → "let" IDENT ( "=" expression )? ";" ;
printStmt      → "print" "(" expression ")" ";" ;
returnStmt     → "return" expression? ";" ;
exprStmt       → expression ";" ;
body           → NEWLINE INDENT NEWLINE* ( declaration NEWLINE* )+ DEDENT
               | simpleStmt+ NEWLINE             (* a returnStmt ends the run *) ;
parameters     → IDENT ( "," IDENT )* ;
expression     → assignment ;
assignment     → IDENT "=" assignment | alteration ;
alteration     → logic_or ( "++" | "--" )* ;
logic_or       → logic_and ( "or" logic_and )* ;
logic_and      → equality  ( "and" equality )* ;
equality       → comparison ( ( "!=" | "==" ) comparison )* ;
comparison     → term ( ( ">" | ">=" | "<" | "<=" | "in" | "not" "in" ) term )* ;
term           → factor ( ( "-" | "+" ) factor )* ;
factor         → unary ( ( "/" | "*" ) unary )* ;
unary          → ( "!" | "-" ) unary | call ;
call           → primary ( "(" arguments? ")" | "[" subscript "]"
                         | "." IDENT "(" arguments? ")" )* ;
subscript      → expression | expression? ":" expression? ;
arguments      → expression ( "," expression )* ;
primary        → NUMBER | STRING | "true" | "false" | "null"
               | IDENT | "(" expression ")" | "[" arguments? "]" ;
```
*/

use std::rc::Rc;

use crate::ast::{
    BinaryOp, ElifClause, Expr, FunctionDecl, IncDecOp, ListMethod, LiteralValue, LogicalOp, Stmt,
    UnaryOp,
};
use crate::error::{Result, SprigError};
use crate::token::{Token, TokenType};

use log::{debug, info};

/// Upper bound on declared parameters and passed arguments.
const MAX_ARITY: usize = 255;

/// Deepest allowed nesting of blocks, sub-expressions and unary operators.
pub const MAX_NESTING: usize = 32;

/// Stands in for the missing `EOF` of an empty token slice.
static END_OF_INPUT: Token<'static> = Token {
    token_type: TokenType::EOF,
    lexeme: "",
    line: 1,
    column: 1,
};

/// Top‑level parser over an immutable slice of tokens.
pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    current: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Construct a new parser. Scanner output always ends with an `EOF`
    /// token; a slice without one is read as if it had one.
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        info!("Parser created with {} tokens", tokens.len());

        Self {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse an entire program and return its statement list.
    pub fn parse(&mut self) -> Result<Vec<Stmt>> {
        info!("Beginning parse phase");

        let mut statements: Vec<Stmt> = Vec::new();

        loop {
            self.skip_newlines();

            if self.is_at_end() {
                break;
            }

            statements.push(self.declaration()?);
        }

        info!("Parsed {} top-level statements", statements.len());

        Ok(statements)
    }

    /// Parse a single expression followed by end of input.
    pub fn parse_expression(&mut self) -> Result<Expr> {
        let expr: Expr = self.expression()?;

        self.skip_newlines();

        if !self.is_at_end() {
            return Err(SprigError::expected(self.peek(), "end of input"));
        }

        Ok(expr)
    }

    // ──────────────────────── declaration rules ───────────────────

    fn declaration(&mut self) -> Result<Stmt> {
        debug!("Entering declaration at {}", self.peek().position());

        if self.matches(TokenType::DEF) {
            self.function()
        } else if self.matches(TokenType::IF) {
            self.if_statement()
        } else if self.matches(TokenType::WHILE) {
            self.while_statement()
        } else if self.matches(TokenType::FOR) {
            self.for_statement()
        } else {
            self.simple_statement()
        }
    }

    fn function(&mut self) -> Result<Stmt> {
        let keyword: &Token<'_> = self.previous();
        let name: &Token<'_> = self.consume(TokenType::IDENTIFIER, "function name")?;

        self.consume(TokenType::LEFT_PAREN, "'(' after function name")?;

        let mut params: Vec<String> = Vec::new();

        if !self.check(TokenType::RIGHT_PAREN) {
            loop {
                if params.len() >= MAX_ARITY {
                    return Err(SprigError::parse(
                        self.peek().position(),
                        format!("cannot have more than {} parameters", MAX_ARITY),
                    ));
                }

                let param: &Token<'_> = self.consume(TokenType::IDENTIFIER, "parameter name")?;
                params.push(param.lexeme.to_string());

                if !self.matches(TokenType::COMMA) {
                    break;
                }
            }
        }

        self.consume(TokenType::RIGHT_PAREN, "')' after parameters")?;
        self.consume(TokenType::COLON, "':' before function body")?;

        let body: Vec<Stmt> = self.body()?;

        Ok(Stmt::Function(Rc::new(FunctionDecl {
            name: name.lexeme.to_string(),
            params,
            body,
            position: keyword.position(),
        })))
    }

    fn var_declaration(&mut self) -> Result<Stmt> {
        let name: &Token<'_> = self.consume(TokenType::IDENTIFIER, "variable name")?;

        let initializer: Option<Expr> = if self.matches(TokenType::EQUAL) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenType::SEMICOLON, "';' after variable declaration")?;

        Ok(Stmt::Var {
            name: name.lexeme.to_string(),
            initializer,
        })
    }

    // ───────────────────────── statement rules ────────────────────

    /// Statements that fit on one line and end with `;`.
    fn simple_statement(&mut self) -> Result<Stmt> {
        if self.matches(TokenType::LET) {
            self.var_declaration()
        } else if self.matches(TokenType::PRINT) {
            self.print_statement()
        } else if self.matches(TokenType::RETURN) {
            self.return_statement()
        } else {
            self.expression_statement()
        }
    }

    fn if_statement(&mut self) -> Result<Stmt> {
        let condition: Expr = self.expression()?;
        self.consume(TokenType::COLON, "':' after if condition")?;
        let then_branch: Vec<Stmt> = self.body()?;

        let mut elif_branches: Vec<ElifClause> = Vec::new();

        while self.matches(TokenType::ELIF) {
            let condition: Expr = self.expression()?;
            self.consume(TokenType::COLON, "':' after elif condition")?;
            let body: Vec<Stmt> = self.body()?;

            elif_branches.push(ElifClause { condition, body });
        }

        let else_branch: Option<Vec<Stmt>> = if self.matches(TokenType::ELSE) {
            self.consume(TokenType::COLON, "':' after 'else'")?;
            Some(self.body()?)
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            elif_branches,
            else_branch,
        })
    }

    fn while_statement(&mut self) -> Result<Stmt> {
        let condition: Expr = self.expression()?;
        self.consume(TokenType::COLON, "':' after while condition")?;
        let body: Vec<Stmt> = self.body()?;

        Ok(Stmt::While { condition, body })
    }

    fn for_statement(&mut self) -> Result<Stmt> {
        let keyword: &Token<'_> = self.previous();
        let variable: &Token<'_> = self.consume(TokenType::IDENTIFIER, "loop variable name")?;

        self.consume(TokenType::IN, "'in' after loop variable")?;
        let iterable: Expr = self.expression()?;

        let step: Option<Expr> = if self.matches(TokenType::STEP) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenType::COLON, "':' after for clause")?;
        let body: Vec<Stmt> = self.body()?;

        Ok(Stmt::For {
            variable: variable.lexeme.to_string(),
            iterable,
            step,
            body,
            position: keyword.position(),
        })
    }

    fn print_statement(&mut self) -> Result<Stmt> {
        self.consume(TokenType::LEFT_PAREN, "'(' after 'print'")?;
        let value: Expr = self.expression()?;
        self.consume(TokenType::RIGHT_PAREN, "')' after print value")?;
        self.consume(TokenType::SEMICOLON, "';' after print statement")?;

        Ok(Stmt::Print(value))
    }

    fn return_statement(&mut self) -> Result<Stmt> {
        let keyword: &Token<'_> = self.previous();

        let value: Option<Expr> = if !self.check(TokenType::SEMICOLON) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenType::SEMICOLON, "';' after return value")?;

        Ok(Stmt::Return {
            value,
            position: keyword.position(),
        })
    }

    fn expression_statement(&mut self) -> Result<Stmt> {
        let expr: Expr = self.expression()?;
        self.consume(TokenType::SEMICOLON, "';' after expression")?;

        Ok(Stmt::Expression(expr))
    }

    /// The statements after a header's `:`. Either an indented block on the
    /// following lines or simple statements on the header's own line.
    fn body(&mut self) -> Result<Vec<Stmt>> {
        self.nested(Self::suite)
    }

    fn suite(&mut self) -> Result<Vec<Stmt>> {
        let mut statements: Vec<Stmt> = Vec::new();

        if self.matches(TokenType::NEWLINE) {
            self.consume(TokenType::INDENT, "an indented block")?;
            debug!("Entering indented block");

            loop {
                self.skip_newlines();

                if self.check(TokenType::DEDENT) || self.is_at_end() {
                    break;
                }

                statements.push(self.declaration()?);
            }

            if statements.is_empty() {
                return Err(SprigError::expected(self.peek(), "a statement"));
            }

            self.consume(TokenType::DEDENT, "end of indented block")?;
            debug!("Leaving indented block with {} statements", statements.len());
        } else {
            loop {
                let stmt: Stmt = self.simple_statement()?;
                let closes_suite: bool = matches!(stmt, Stmt::Return { .. });

                statements.push(stmt);

                // Anything after `return` on this line belongs to the enclosing
                // block. A `return` that ends the line takes its NEWLINE with it,
                // so an `elif`/`else` can follow on the next line.
                if closes_suite {
                    self.matches(TokenType::NEWLINE);
                    break;
                }

                if self.matches(TokenType::NEWLINE)
                    || self.check(TokenType::DEDENT)
                    || self.is_at_end()
                {
                    break;
                }
            }
        }

        Ok(statements)
    }

    // ─────────────────────── expression rules ─────────────────────

    fn expression(&mut self) -> Result<Expr> {
        self.nested(Self::assignment)
    }

    fn assignment(&mut self) -> Result<Expr> {
        let expr: Expr = self.alteration()?;

        if self.matches(TokenType::EQUAL) {
            let equals: &Token<'_> = self.previous();
            let value: Expr = self.assignment()?;

            return match expr {
                Expr::Variable { name, position } => Ok(Expr::Assign {
                    name,
                    value: Box::new(value),
                    position,
                }),

                _ => Err(SprigError::parse(
                    equals.position(),
                    "invalid assignment target: only a variable name can be assigned",
                )),
            };
        }

        Ok(expr)
    }

    fn alteration(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.logical_or()?;

        while self.matches(TokenType::PLUS_PLUS) || self.matches(TokenType::MINUS_MINUS) {
            let operator_token: &Token<'_> = self.previous();
            let operator: IncDecOp = if operator_token.token_type == TokenType::PLUS_PLUS {
                IncDecOp::Increment
            } else {
                IncDecOp::Decrement
            };

            expr = match expr {
                Expr::Variable { name, .. } => Expr::PostfixIncDec {
                    name,
                    operator,
                    position: operator_token.position(),
                },

                _ => {
                    return Err(SprigError::parse(
                        operator_token.position(),
                        format!(
                            "invalid '{}' target: only a variable name can be altered",
                            operator.symbol()
                        ),
                    ))
                }
            };
        }

        Ok(expr)
    }

    fn logical_or(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.logical_and()?;

        while self.matches(TokenType::OR) {
            let right: Expr = self.logical_and()?;

            expr = Expr::Logical {
                left: Box::new(expr),
                operator: LogicalOp::Or,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn logical_and(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.equality()?;

        while self.matches(TokenType::AND) {
            let right: Expr = self.equality()?;

            expr = Expr::Logical {
                left: Box::new(expr),
                operator: LogicalOp::And,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.comparison()?;

        while self.matches(TokenType::BANG_EQUAL) || self.matches(TokenType::EQUAL_EQUAL) {
            let operator: &Token<'_> = self.previous();
            let right: Expr = self.comparison()?;

            expr = binary(expr, operator, right)?;
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.term()?;

        loop {
            if self.matches(TokenType::GREATER)
                || self.matches(TokenType::GREATER_EQUAL)
                || self.matches(TokenType::LESS)
                || self.matches(TokenType::LESS_EQUAL)
            {
                let operator: &Token<'_> = self.previous();
                let right: Expr = self.term()?;

                expr = binary(expr, operator, right)?;
            } else if self.check(TokenType::IN)
                || (self.check(TokenType::NOT) && self.check_next(TokenType::IN))
            {
                let negated: bool = self.matches(TokenType::NOT);
                let operator: &Token<'_> = self.advance(); // "in"
                let right: Expr = self.term()?;

                expr = Expr::Membership {
                    left: Box::new(expr),
                    negated,
                    right: Box::new(right),
                    position: operator.position(),
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.factor()?;

        while self.matches(TokenType::MINUS) || self.matches(TokenType::PLUS) {
            let operator: &Token<'_> = self.previous();
            let right: Expr = self.factor()?;

            expr = binary(expr, operator, right)?;
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.unary()?;

        while self.matches(TokenType::STAR) || self.matches(TokenType::SLASH) {
            let operator: &Token<'_> = self.previous();
            let right: Expr = self.nested(Self::unary)?;

            expr = binary(expr, operator, right)?;
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr> {
        if self.matches(TokenType::BANG) || self.matches(TokenType::MINUS) {
            let operator: &Token<'_> = self.previous();
            let right: Expr = self.unary()?;

            let op: UnaryOp = if operator.token_type == TokenType::BANG {
                UnaryOp::Not
            } else {
                UnaryOp::Negate
            };

            return Ok(Expr::Unary {
                operator: op,
                right: Box::new(right),
                position: operator.position(),
            });
        }

        self.call()
    }

    fn call(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.primary()?;

        loop {
            if self.matches(TokenType::LEFT_PAREN) {
                let paren: &Token<'_> = self.previous();
                let arguments: Vec<Expr> = self.arguments(TokenType::RIGHT_PAREN)?;

                self.consume(TokenType::RIGHT_PAREN, "')' after arguments")?;

                expr = Expr::Call {
                    callee: Box::new(expr),
                    arguments,
                    position: paren.position(),
                };
            } else if self.matches(TokenType::LEFT_BRACKET) {
                expr = self.subscript(expr)?;
            } else if self.matches(TokenType::DOT) {
                expr = self.method_call(expr)?;
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// `object[index]` or `object[start:end]`; the `[` is already consumed.
    fn subscript(&mut self, object: Expr) -> Result<Expr> {
        let bracket: &Token<'_> = self.previous();

        if self.matches(TokenType::COLON) {
            return self.slice(object, None, bracket);
        }

        let index: Expr = self.expression()?;

        if self.matches(TokenType::COLON) {
            return self.slice(object, Some(index), bracket);
        }

        self.consume(TokenType::RIGHT_BRACKET, "']' after index")?;

        Ok(Expr::Index {
            object: Box::new(object),
            index: Box::new(index),
            position: bracket.position(),
        })
    }

    fn slice(&mut self, object: Expr, start: Option<Expr>, bracket: &Token<'_>) -> Result<Expr> {
        let end: Option<Expr> = if self.check(TokenType::RIGHT_BRACKET) {
            None
        } else {
            Some(self.expression()?)
        };

        self.consume(TokenType::RIGHT_BRACKET, "']' after slice")?;

        Ok(Expr::Slice {
            object: Box::new(object),
            start: start.map(Box::new),
            end: end.map(Box::new),
            position: bracket.position(),
        })
    }

    /// `name.method(arguments)`; the `.` is already consumed.
    fn method_call(&mut self, receiver: Expr) -> Result<Expr> {
        let dot: &Token<'_> = self.previous();
        let name: &Token<'_> = self.consume(TokenType::IDENTIFIER, "method name after '.'")?;

        let receiver: String = match receiver {
            Expr::Variable { name, .. } => name,
            _ => {
                return Err(SprigError::parse(
                    dot.position(),
                    "invalid method receiver: only a variable name can have methods called on it",
                ))
            }
        };

        let method: ListMethod = ListMethod::from_name(name.lexeme).ok_or_else(|| {
            SprigError::parse(
                name.position(),
                format!("unknown list method '{}'", name.lexeme),
            )
        })?;

        self.consume(TokenType::LEFT_PAREN, "'(' after method name")?;
        let arguments: Vec<Expr> = self.arguments(TokenType::RIGHT_PAREN)?;
        self.consume(TokenType::RIGHT_PAREN, "')' after arguments")?;

        Ok(Expr::MethodCall {
            receiver,
            method,
            arguments,
            position: name.position(),
        })
    }

    /// Comma-separated expressions up to (not including) `closing`.
    fn arguments(&mut self, closing: TokenType) -> Result<Vec<Expr>> {
        let mut arguments: Vec<Expr> = Vec::new();

        if !self.check(closing) {
            loop {
                if arguments.len() >= MAX_ARITY {
                    return Err(SprigError::parse(
                        self.peek().position(),
                        format!("cannot have more than {} arguments", MAX_ARITY),
                    ));
                }

                arguments.push(self.expression()?);

                if !self.matches(TokenType::COMMA) {
                    break;
                }
            }
        }

        Ok(arguments)
    }

    fn primary(&mut self) -> Result<Expr> {
        if self.matches(TokenType::FALSE) {
            return Ok(Expr::Literal(LiteralValue::False));
        }
        if self.matches(TokenType::TRUE) {
            return Ok(Expr::Literal(LiteralValue::True));
        }
        if self.matches(TokenType::NULL) {
            return Ok(Expr::Literal(LiteralValue::Null));
        }

        if let TokenType::NUMBER(n) = self.peek().token_type {
            self.advance();
            return Ok(Expr::Literal(LiteralValue::Number(n)));
        }

        if let TokenType::STRING(ref s) = self.peek().token_type {
            let s: String = s.clone();
            self.advance();
            return Ok(Expr::Literal(LiteralValue::Str(s)));
        }

        if self.matches(TokenType::IDENTIFIER) {
            let name: &Token<'_> = self.previous();

            return Ok(Expr::Variable {
                name: name.lexeme.to_string(),
                position: name.position(),
            });
        }

        if self.matches(TokenType::LEFT_PAREN) {
            let expr: Expr = self.expression()?;

            self.consume(TokenType::RIGHT_PAREN, "')' after expression")?;

            return Ok(Expr::Grouping(Box::new(expr)));
        }

        if self.matches(TokenType::LEFT_BRACKET) {
            let bracket: &Token<'_> = self.previous();
            let items: Vec<Expr> = self.arguments(TokenType::RIGHT_BRACKET)?;

            self.consume(TokenType::RIGHT_BRACKET, "']' after list items")?;

            return Ok(Expr::List {
                items,
                position: bracket.position(),
            });
        }

        Err(SprigError::expected(self.peek(), "expression"))
    }

    // ────────────────────── utility helpers ───────────────────────

    /// Run `rule` one nesting level deeper, failing past [`MAX_NESTING`].
    fn nested<T>(&mut self, rule: fn(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING {
            return Err(SprigError::parse(
                self.peek().position(),
                format!("nested too deeply: more than {} levels", MAX_NESTING),
            ));
        }

        self.depth += 1;
        let result: Result<T> = rule(self);
        self.depth -= 1;

        result
    }

    #[inline(always)]
    fn matches(&mut self, ttype: TokenType) -> bool {
        if self.check(ttype) {
            self.advance();

            return true;
        }

        false
    }

    #[inline(always)]
    fn consume(&mut self, ttype: TokenType, expected: &str) -> Result<&'a Token<'a>> {
        if self.check(ttype) {
            return Ok(self.advance());
        }

        debug!("consume failed: wanted {}, at {}", expected, self.peek().position());

        Err(SprigError::expected(self.peek(), expected))
    }

    #[inline(always)]
    fn check(&self, ttype: TokenType) -> bool {
        if self.is_at_end() {
            return ttype == TokenType::EOF;
        }

        self.peek().token_type == ttype
    }

    /// One token beyond [`check`]; used to recognise `not in`.
    fn check_next(&self, ttype: TokenType) -> bool {
        self.tokens
            .get(self.current + 1)
            .is_some_and(|t| t.token_type == ttype)
    }

    fn skip_newlines(&mut self) {
        while self.matches(TokenType::NEWLINE) {}
    }

    #[inline(always)]
    fn advance(&mut self) -> &'a Token<'a> {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        matches!(self.peek().token_type, TokenType::EOF)
    }

    #[inline(always)]
    fn peek(&self) -> &'a Token<'a> {
        let tokens: &'a [Token<'a>] = self.tokens;
        let index: usize = self.current.min(tokens.len().saturating_sub(1));

        tokens.get(index).unwrap_or(&END_OF_INPUT)
    }

    #[inline(always)]
    fn previous(&self) -> &'a Token<'a> {
        let tokens: &'a [Token<'a>] = self.tokens;

        tokens
            .get(self.current.saturating_sub(1))
            .unwrap_or(&END_OF_INPUT)
    }
}

/// Build a [`Expr::Binary`] node. Callers pass the token just matched by one
/// of the arithmetic, equality or ordering rules.
fn binary(left: Expr, operator: &Token<'_>, right: Expr) -> Result<Expr> {
    let op: BinaryOp = match operator.token_type {
        TokenType::PLUS => BinaryOp::Add,
        TokenType::MINUS => BinaryOp::Subtract,
        TokenType::STAR => BinaryOp::Multiply,
        TokenType::SLASH => BinaryOp::Divide,
        TokenType::EQUAL_EQUAL => BinaryOp::Equal,
        TokenType::BANG_EQUAL => BinaryOp::NotEqual,
        TokenType::GREATER => BinaryOp::Greater,
        TokenType::GREATER_EQUAL => BinaryOp::GreaterEqual,
        TokenType::LESS => BinaryOp::Less,
        TokenType::LESS_EQUAL => BinaryOp::LessEqual,
        _ => return Err(SprigError::expected(operator, "a binary operator")),
    };

    Ok(Expr::Binary {
        left: Box::new(left),
        operator: op,
        right: Box::new(right),
        position: operator.position(),
    })
}
