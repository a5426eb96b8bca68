use super::*;

impl Parser {
    /// Pratt loop: run the prefix handler, wrap a trailing `++`/`--` as a
    /// postfix, then let infix handlers take over while the peek token binds
    /// tighter than `min` and isn't a statement boundary.
    pub(super) fn parse_expression(&mut self, min: Precedence) -> Option<Expr> {
        let mut left = self.parse_prefix()?;

        if matches!(
            self.peek_token.kind,
            TokenKind::Increment | TokenKind::Decrement
        ) {
            self.next_token();
            let op = match self.cur_token.kind {
                TokenKind::Increment => PostfixOp::Inc,
                _ => PostfixOp::Dec,
            };
            left = Expr::Postfix(Box::new(left), op);
        }

        while !self.peek_is(&TokenKind::Semicolon) && min < self.peek_precedence() {
            if !has_infix(&self.peek_token.kind) {
                return Some(left);
            }
            self.next_token();
            left = self.parse_infix(left)?;
        }
        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        match self.cur_token.kind.clone() {
            TokenKind::Int(value) => Some(Expr::Int(value)),
            TokenKind::Float(value) => Some(Expr::Float(value)),
            TokenKind::Bool(value) => Some(Expr::Bool(value)),
            TokenKind::Str(value) => Some(Expr::Str(value)),
            TokenKind::Ident(name) => Some(Expr::Ident(name)),
            TokenKind::Bang => self.parse_prefix_expression(PrefixOp::Not),
            TokenKind::Minus => self.parse_prefix_expression(PrefixOp::Neg),
            TokenKind::Increment => self.parse_prefix_expression(PrefixOp::Inc),
            TokenKind::Decrement => self.parse_prefix_expression(PrefixOp::Dec),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_hash_literal(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            kind => {
                self.error_at_cur(format!("no prefix parse function for {} found", kind));
                None
            }
        }
    }

    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        match self.cur_token.kind {
            TokenKind::Plus => self.parse_infix_expression(InfixOp::Add, left),
            TokenKind::Minus => self.parse_infix_expression(InfixOp::Sub, left),
            TokenKind::Star => self.parse_infix_expression(InfixOp::Mul, left),
            TokenKind::Slash => self.parse_infix_expression(InfixOp::Div, left),
            TokenKind::Percent => self.parse_infix_expression(InfixOp::Mod, left),
            TokenKind::Power => self.parse_infix_expression(InfixOp::Pow, left),
            TokenKind::Eq => self.parse_infix_expression(InfixOp::Eq, left),
            TokenKind::Neq => self.parse_infix_expression(InfixOp::Neq, left),
            TokenKind::Lt => self.parse_infix_expression(InfixOp::Lt, left),
            TokenKind::Gt => self.parse_infix_expression(InfixOp::Gt, left),
            TokenKind::Question => self.parse_ternary_expression(left),
            TokenKind::LParen => self.parse_call_expression(left),
            TokenKind::LBracket => self.parse_index_expression(left),
            _ => Some(left),
        }
    }

    fn parse_prefix_expression(&mut self, op: PrefixOp) -> Option<Expr> {
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expr::Prefix(op, Box::new(right)))
    }

    fn parse_infix_expression(&mut self, op: InfixOp, left: Expr) -> Option<Expr> {
        let precedence = self.cur_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(Expr::Infix(op, Box::new(left), Box::new(right)))
    }

    /// `cond ? a : b`. Both branches are single expressions; the consequence
    /// stops at the `:` and the alternative at the statement boundary, so a
    /// ternary never swallows the statements that follow it.
    fn parse_ternary_expression(&mut self, condition: Expr) -> Option<Expr> {
        self.next_token();
        let consequence = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(&TokenKind::Colon)?;
        self.next_token();
        let alternative = self.parse_expression(Precedence::Lowest)?;
        Some(Expr::Ternary {
            condition: Box::new(condition),
            consequence: Box::new(consequence),
            alternative: Box::new(alternative),
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expr> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(&TokenKind::RParen)?;
        Some(expr)
    }

    fn parse_array_literal(&mut self) -> Option<Expr> {
        let elements = self.parse_expression_list(&TokenKind::RBracket)?;
        Some(Expr::Array(elements))
    }

    fn parse_hash_literal(&mut self) -> Option<Expr> {
        let mut pairs = Vec::new();

        while !self.peek_is(&TokenKind::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;
            self.expect_peek(&TokenKind::Colon)?;
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            if !self.peek_is(&TokenKind::RBrace) {
                self.expect_peek(&TokenKind::Comma)?;
            }
        }

        self.expect_peek(&TokenKind::RBrace)?;
        Some(Expr::Hash(pairs))
    }

    fn parse_call_expression(&mut self, function: Expr) -> Option<Expr> {
        let args = self.parse_expression_list(&TokenKind::RParen)?;
        Some(Expr::Call {
            function: Box::new(function),
            args,
        })
    }

    fn parse_index_expression(&mut self, left: Expr) -> Option<Expr> {
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(&TokenKind::RBracket)?;
        Some(Expr::Index(Box::new(left), Box::new(index)))
    }

    /// Comma-separated expressions up to (and consuming) `end`.
    fn parse_expression_list(&mut self, end: &TokenKind) -> Option<Vec<Expr>> {
        let mut list = Vec::new();

        if self.peek_is(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(&TokenKind::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;
        Some(list)
    }
}

/// Tokens with an infix handler. `++`/`--` carry Sum precedence but are
/// postfix-only, so the Pratt loop must stop on them rather than recurse.
fn has_infix(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Percent
            | TokenKind::Power
            | TokenKind::Eq
            | TokenKind::Neq
            | TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::Question
            | TokenKind::LParen
            | TokenKind::LBracket
    )
}
