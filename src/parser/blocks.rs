use super::*;

impl Parser {
    /// Statements up to the matching `}`. Expects the current token to be
    /// `{`; leaves it on the closing brace. A failed statement inside the
    /// block resynchronizes at the next `;` and parsing continues.
    pub(super) fn parse_block_statement(&mut self) -> Block {
        let mut block = Block::default();
        self.next_token();

        while !self.cur_is(&TokenKind::RBrace) && !self.cur_is(&TokenKind::Eof) {
            match self.parse_statement() {
                Some(stmt) => block.statements.push(stmt),
                None => {
                    while !self.cur_is(&TokenKind::Semicolon)
                        && !self.cur_is(&TokenKind::RBrace)
                        && !self.cur_is(&TokenKind::Eof)
                    {
                        self.next_token();
                    }
                    if self.cur_is(&TokenKind::RBrace) {
                        break;
                    }
                }
            }
            self.next_token();
        }
        block
    }

    pub(super) fn parse_if_expression(&mut self) -> Option<Expr> {
        self.expect_peek(&TokenKind::LParen)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(&TokenKind::RParen)?;
        self.expect_peek(&TokenKind::LBrace)?;
        let consequence = self.parse_block_statement();

        let mut elifs = Vec::new();
        while self.peek_is(&TokenKind::Elif) {
            self.next_token();
            self.expect_peek(&TokenKind::LParen)?;
            self.next_token();
            let elif_condition = self.parse_expression(Precedence::Lowest)?;
            self.expect_peek(&TokenKind::RParen)?;
            self.expect_peek(&TokenKind::LBrace)?;
            elifs.push(ElifClause {
                condition: elif_condition,
                consequence: self.parse_block_statement(),
            });
        }

        let alternative = if self.peek_is(&TokenKind::Else) {
            self.next_token();
            self.expect_peek(&TokenKind::LBrace)?;
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expr::If {
            condition: Box::new(condition),
            consequence,
            elifs,
            alternative,
        })
    }

    /// `func` with an optional name. A named literal is also bound in the
    /// current environment by the evaluator.
    pub(super) fn parse_function_literal(&mut self) -> Option<Expr> {
        let name = if let TokenKind::Ident(name) = &self.peek_token.kind {
            let name = name.clone();
            self.next_token();
            Some(name)
        } else {
            None
        };

        self.expect_peek(&TokenKind::LParen)?;
        let params = self.parse_function_parameters()?;
        self.expect_peek(&TokenKind::LBrace)?;
        let body = self.parse_block_statement();

        Some(Expr::Function {
            name,
            params,
            body: Rc::new(body),
        })
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<String>> {
        let mut params = Vec::new();

        if self.peek_is(&TokenKind::RParen) {
            self.next_token();
            return Some(params);
        }

        params.push(self.expect_peek_ident()?);
        while self.peek_is(&TokenKind::Comma) {
            self.next_token();
            params.push(self.expect_peek_ident()?);
        }

        self.expect_peek(&TokenKind::RParen)?;
        Some(params)
    }

    /// `for (` init? condition (`;` post-step)* `)` `{body}`. The init slot
    /// is a `propose` statement; at least one condition expression is
    /// required (`for (true)` is the infinite loop).
    pub(super) fn parse_for_statement(&mut self) -> Option<Stmt> {
        self.expect_peek(&TokenKind::LParen)?;

        let init = if self.peek_is(&TokenKind::Let) {
            self.next_token();
            Some(Box::new(self.parse_let_statement()?))
        } else {
            None
        };

        let mut conditions = Vec::new();
        loop {
            self.next_token();
            conditions.push(self.parse_expression(Precedence::Lowest)?);
            if self.peek_is(&TokenKind::Semicolon) {
                self.next_token();
            } else {
                break;
            }
        }

        self.expect_peek(&TokenKind::RParen)?;
        self.expect_peek(&TokenKind::LBrace)?;
        let body = self.parse_block_statement();

        Some(Stmt::For(ForLoop {
            init,
            conditions,
            body,
        }))
    }
}
