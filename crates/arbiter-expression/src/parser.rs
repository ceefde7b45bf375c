//! Expression parser
//!
//! Parses string expressions into Expression AST nodes.
//!
//! Supported syntax:
//! - Variables and field access: `value`, `context.original_input.amount`
//! - Literals: `42`, `3.14`, `"string"`, `'string'`, `true`, `false`, `null`, `[1, 2]`
//! - Binary operators: `>`, `<`, `>=`, `<=`, `==`, `!=`, `===`, `!==`, `+`, `-`, `*`, `/`, `%`,
//!   `&&`, `||`, `and`, `or`
//! - Keyword operators: `in`, `not in`, `contains`, `starts_with`, `ends_with`
//! - Unary operators: `!`, `not`, `-`
//! - Function calls: `add(5)`, `max(1, value)`
//! - Ternary: `value > 10 ? "high" : "low"`
//! - Parentheses for grouping: `(a + b) * c`

use crate::error::{ExpressionError, Result};
use crate::lexer::{tokenize, Token};
use arbiter_core::ast::{Expression, Operator, UnaryOperator};
use arbiter_core::Value;

/// Deepest nesting accepted, counting groups, unary prefixes, ternaries and
/// chained binary operators
const MAX_DEPTH: usize = 128;

/// Expression parser
pub struct ExpressionParser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl ExpressionParser {
    /// Parse an expression from a string
    pub fn parse(input: &str) -> Result<Expression> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ExpressionError::Syntax("Empty expression".to_string()));
        }

        let mut parser = Self {
            tokens: tokenize(input)?,
            pos: 0,
            depth: 0,
        };
        let expression = parser.parse_ternary()?;

        match parser.peek() {
            None => Ok(expression),
            Some(token) => Err(ExpressionError::Syntax(format!(
                "unexpected {:?} in '{}'",
                token, input
            ))),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        match self.advance() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(ExpressionError::Syntax(format!(
                "expected {:?}, found {:?}",
                expected, token
            ))),
            None => Err(ExpressionError::Syntax(format!(
                "expected {:?}, found end of expression",
                expected
            ))),
        }
    }

    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExpressionError::Syntax(format!(
                "expression nested too deeply (max {})",
                MAX_DEPTH
            )));
        }
        Ok(())
    }

    fn is_keyword(&self, offset: usize, keyword: &str) -> bool {
        matches!(self.peek_at(offset), Some(Token::Ident(word)) if word == keyword)
    }

    /// condition ? a : b (right associative, lowest precedence)
    fn parse_ternary(&mut self) -> Result<Expression> {
        let condition = self.parse_or()?;

        if self.peek() == Some(&Token::Question) {
            self.advance();
            self.descend()?;
            let true_expr = self.parse_ternary()?;
            self.expect(Token::Colon)?;
            let false_expr = self.parse_ternary()?;
            self.depth -= 1;
            return Ok(Expression::ternary(condition, true_expr, false_expr));
        }

        Ok(condition)
    }

    fn parse_or(&mut self) -> Result<Expression> {
        let mut left = self.parse_and()?;
        let mut chained = 0;

        while self.peek() == Some(&Token::Op("||")) || self.is_keyword(0, "or") {
            self.advance();
            self.descend()?;
            chained += 1;
            let right = self.parse_and()?;
            left = Expression::binary(left, Operator::Or, right);
        }

        self.depth -= chained;
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expression> {
        let mut left = self.parse_comparison()?;
        let mut chained = 0;

        while self.peek() == Some(&Token::Op("&&")) || self.is_keyword(0, "and") {
            self.advance();
            self.descend()?;
            chained += 1;
            let right = self.parse_comparison()?;
            left = Expression::binary(left, Operator::And, right);
        }

        self.depth -= chained;
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expression> {
        let mut left = self.parse_additive()?;
        let mut chained = 0;

        while let Some(op) = self.comparison_operator() {
            self.descend()?;
            chained += 1;
            let right = self.parse_additive()?;
            left = Expression::binary(left, op, right);
        }

        self.depth -= chained;
        Ok(left)
    }

    /// Consume a comparison or keyword operator if one is next
    fn comparison_operator(&mut self) -> Option<Operator> {
        let (op, width) = match self.peek()? {
            Token::Op("==") | Token::Op("===") => (Operator::Eq, 1),
            Token::Op("!=") | Token::Op("!==") => (Operator::Ne, 1),
            Token::Op("<") => (Operator::Lt, 1),
            Token::Op("<=") => (Operator::Le, 1),
            Token::Op(">") => (Operator::Gt, 1),
            Token::Op(">=") => (Operator::Ge, 1),
            Token::Ident(word) => match word.as_str() {
                "in" => (Operator::In, 1),
                "contains" => (Operator::Contains, 1),
                "starts_with" => (Operator::StartsWith, 1),
                "ends_with" => (Operator::EndsWith, 1),
                "not" if self.is_keyword(1, "in") => (Operator::NotIn, 2),
                _ => return None,
            },
            _ => return None,
        };

        self.pos += width;
        Some(op)
    }

    fn parse_additive(&mut self) -> Result<Expression> {
        let mut left = self.parse_multiplicative()?;
        let mut chained = 0;

        loop {
            let op = match self.peek() {
                Some(Token::Op("+")) => Operator::Add,
                Some(Token::Op("-")) => Operator::Sub,
                _ => break,
            };
            self.advance();
            self.descend()?;
            chained += 1;
            let right = self.parse_multiplicative()?;
            left = Expression::binary(left, op, right);
        }

        self.depth -= chained;
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expression> {
        let mut left = self.parse_unary()?;
        let mut chained = 0;

        loop {
            let op = match self.peek() {
                Some(Token::Op("*")) => Operator::Mul,
                Some(Token::Op("/")) => Operator::Div,
                Some(Token::Op("%")) => Operator::Mod,
                _ => break,
            };
            self.advance();
            self.descend()?;
            chained += 1;
            let right = self.parse_unary()?;
            left = Expression::binary(left, op, right);
        }

        self.depth -= chained;
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression> {
        self.descend()?;
        let expression = self.parse_prefixed();
        self.depth -= 1;
        expression
    }

    fn parse_prefixed(&mut self) -> Result<Expression> {
        if self.peek() == Some(&Token::Op("!")) || self.is_keyword(0, "not") {
            self.advance();
            return Ok(Expression::unary(UnaryOperator::Not, self.parse_unary()?));
        }

        if self.peek() == Some(&Token::Op("-")) {
            self.advance();
            return Ok(Expression::unary(UnaryOperator::Negate, self.parse_unary()?));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(Expression::literal(n)),
            Some(Token::Str(s)) => Ok(Expression::literal(s)),
            Some(Token::LParen) => {
                let inner = self.parse_ternary()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(Token::LBracket) => {
                let items = self.parse_list(Token::RBracket)?;
                Ok(Expression::Array(items))
            }
            Some(Token::Ident(name)) => self.parse_identifier(name),
            Some(token) => Err(ExpressionError::Syntax(format!("unexpected {:?}", token))),
            None => Err(ExpressionError::Syntax(
                "unexpected end of expression".to_string(),
            )),
        }
    }

    /// Literal keyword, function call, or dotted field access
    fn parse_identifier(&mut self, name: String) -> Result<Expression> {
        match name.as_str() {
            "true" => return Ok(Expression::literal(true)),
            "false" => return Ok(Expression::literal(false)),
            "null" => return Ok(Expression::Literal(Value::Null)),
            _ => {}
        }

        if self.peek() == Some(&Token::LParen) {
            self.advance();
            let args = self.parse_list(Token::RParen)?;
            return Ok(Expression::function_call(name, args));
        }

        let mut path = vec![name];
        while self.peek() == Some(&Token::Dot) {
            self.advance();
            match self.advance() {
                Some(Token::Ident(segment)) => path.push(segment),
                other => {
                    return Err(ExpressionError::Syntax(format!(
                        "expected field name after '.', found {:?}",
                        other
                    )))
                }
            }
        }

        Ok(Expression::field_access(path))
    }

    /// Comma separated expressions up to the closing token
    fn parse_list(&mut self, close: Token) -> Result<Vec<Expression>> {
        let mut items = Vec::new();

        if self.peek() == Some(&close) {
            self.advance();
            return Ok(items);
        }

        loop {
            items.push(self.parse_ternary()?);
            match self.advance() {
                Some(Token::Comma) => continue,
                Some(token) if token == close => return Ok(items),
                other => {
                    return Err(ExpressionError::Syntax(format!(
                        "expected ',' or {:?}, found {:?}",
                        close, other
                    )))
                }
            }
        }
    }
}
