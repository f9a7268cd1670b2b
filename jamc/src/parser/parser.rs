use crate::error::CompileError;
use crate::ir::ast;
use crate::span::Span;

use super::token::{Literal, Token, TokenKind};

const ARITH_OPS: [TokenKind; 5] = [
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Star,
    TokenKind::Slash,
    TokenKind::Percent,
];

const REL_OPS: [TokenKind; 6] = [
    TokenKind::Less,
    TokenKind::LessEqual,
    TokenKind::Greater,
    TokenKind::GreaterEqual,
    TokenKind::Equal,
    TokenKind::NotEqual,
];

const BASE_TYPES: [TokenKind; 5] = [
    TokenKind::Int,
    TokenKind::Float,
    TokenKind::Char,
    TokenKind::String,
    TokenKind::Bool,
];

/// Parses a newline-free token sequence into a program.
///
/// A missing trailing `Eof` is supplied, so any token vector is accepted.
pub fn parse_tokens(mut tokens: Vec<Token>) -> Result<ast::Program, CompileError> {
    if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
        let span = tokens
            .last()
            .map(|t| Span::point(t.span.line, t.span.col_end + 1))
            .unwrap_or_default();
        tokens.push(Token::new(TokenKind::Eof, "", span));
    }

    let mut parser = Parser::new(tokens);
    parser.parse_program()
}

/// Predictive recursive-descent parser: every decision looks at the next
/// unconsumed token only, and nothing is ever un-consumed.
struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn parse_program(&mut self) -> Result<ast::Program, CompileError> {
        let mut items = Vec::new();

        while !self.is_at_end() {
            items.push(self.parse_top_item()?);
        }

        Ok(ast::Program { items })
    }

    fn parse_top_item(&mut self) -> Result<ast::TopItem, CompileError> {
        let kind = self.peek().kind;

        if kind == TokenKind::Func {
            return Ok(ast::TopItem::Func(self.parse_function()?));
        }
        if starts_var_decl(kind) {
            return Ok(ast::TopItem::VarDecl(self.parse_var_decl()?));
        }
        // `return` only opens a statement inside a block
        if starts_statement(kind) && kind != TokenKind::Return {
            return Ok(ast::TopItem::Stmt(self.parse_statement()?));
        }

        Err(self.error_at_current("expected declaration or statement"))
    }

    // ===== declarations =====

    // func ["void" | type] IDENT "(" [params] ")" "{" block "}"
    fn parse_function(&mut self) -> Result<ast::FuncDef, CompileError> {
        self.consume(TokenKind::Func, "expected 'func'")?;

        let return_type = if self.check(TokenKind::Void) {
            let token = self.advance();
            ast::Type {
                kind: ast::TypeKind::Void,
                token: Some(token),
                array_rank: 0,
            }
        } else if starts_type(self.peek().kind) {
            self.parse_type()?
        } else {
            ast::Type::implicit_void()
        };

        let name = self.consume(TokenKind::Identifier, "expected function name")?;
        self.consume(TokenKind::LParen, "expected '(' after function name")?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            params.push(self.parse_param()?);
            while self.match_any(&[TokenKind::Comma]) {
                params.push(self.parse_param()?);
            }
        }
        self.consume(TokenKind::RParen, "expected ')' after parameters")?;

        let body = self.parse_block("expected '{' before function body")?;

        Ok(ast::FuncDef {
            name,
            params,
            return_type,
            body,
        })
    }

    // param = type IDENT
    fn parse_param(&mut self) -> Result<ast::Param, CompileError> {
        let ty = self.parse_type()?;
        let name = self.consume(TokenKind::Identifier, "expected parameter name")?;
        Ok(ast::Param { name, ty })
    }

    // type = ["array"] base ("[" "]")*
    fn parse_type(&mut self) -> Result<ast::Type, CompileError> {
        let is_array = self.match_any(&[TokenKind::Array]);
        let token = self.consume_one_of("expected type name", &BASE_TYPES)?;

        let mut array_rank = 0;
        if is_array {
            loop {
                self.consume(TokenKind::LBracket, "expected '[' after array element type")?;
                self.consume(TokenKind::RBracket, "expected ']' in array type")?;
                array_rank += 1;
                if !self.check(TokenKind::LBracket) {
                    break;
                }
            }
        }

        Ok(ast::Type {
            kind: type_kind(token.kind),
            token: Some(token),
            array_rank,
        })
    }

    // var_decl = ["array"] base ("[" aexpr "]")* IDENT ["=" init] ("," IDENT)* ";"
    fn parse_var_decl(&mut self) -> Result<ast::VarDecl, CompileError> {
        let is_array = self.match_any(&[TokenKind::Array]);
        let base = self.consume_one_of("expected type name", &BASE_TYPES)?;

        let mut dims = Vec::new();
        if is_array {
            loop {
                self.consume(TokenKind::LBracket, "expected '[' after array element type")?;
                dims.push(self.parse_aexpr()?);
                self.consume(TokenKind::RBracket, "expected ']' after array dimension")?;
                if !self.check(TokenKind::LBracket) {
                    break;
                }
            }
        }

        let mut names = vec![self.consume(TokenKind::Identifier, "expected variable name")?];

        let init = if self.match_any(&[TokenKind::Assign]) {
            Some(self.parse_initializer(dims.len())?)
        } else {
            None
        };

        while self.match_any(&[TokenKind::Comma]) {
            names.push(self.consume(TokenKind::Identifier, "expected variable name after ','")?);
        }
        self.consume(TokenKind::Semicolon, "expected ';' after declaration")?;

        let ty = ast::Type {
            kind: type_kind(base.kind),
            token: Some(base),
            array_rank: dims.len(),
        };

        Ok(ast::VarDecl {
            ty,
            dims,
            names,
            init,
        })
    }

    // init = aexpr | "{" init ("," init)* "}", one brace level per dimension
    fn parse_initializer(&mut self, depth: usize) -> Result<ast::Initializer, CompileError> {
        if depth == 0 {
            return Ok(ast::Initializer::Expr(self.parse_aexpr()?));
        }

        self.consume(TokenKind::LBrace, "expected '{' to open array initializer")?;
        let mut items = vec![self.parse_initializer(depth - 1)?];
        while self.match_any(&[TokenKind::Comma]) {
            items.push(self.parse_initializer(depth - 1)?);
        }
        self.consume(TokenKind::RBrace, "expected '}' to close array initializer")?;

        Ok(ast::Initializer::List(items))
    }

    // ===== statements =====

    // "{" stmt* "}"
    fn parse_block(&mut self, open_message: &str) -> Result<Vec<ast::Stmt>, CompileError> {
        self.consume(TokenKind::LBrace, open_message)?;

        let mut body = Vec::new();
        while starts_statement(self.peek().kind) {
            body.push(self.parse_statement()?);
        }

        self.consume(TokenKind::RBrace, "expected '}' to close block")?;
        Ok(body)
    }

    fn parse_statement(&mut self) -> Result<ast::Stmt, CompileError> {
        match self.peek().kind {
            kind if starts_var_decl(kind) => Ok(ast::Stmt::VarDecl(self.parse_var_decl()?)),
            TokenKind::Return => self.parse_return(),
            TokenKind::Call => self.parse_call_statement(),
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::While => self.parse_while(),
            TokenKind::IntLiteral | TokenKind::Identifier | TokenKind::LParen => {
                let assign = self.parse_assign()?;
                self.consume(TokenKind::Semicolon, "expected ';' after assignment")?;
                Ok(ast::Stmt::Assign(assign))
            }
            _ => Err(self.error_at_current("expected statement")),
        }
    }

    fn parse_return(&mut self) -> Result<ast::Stmt, CompileError> {
        self.consume(TokenKind::Return, "expected 'return'")?;
        let value = self.parse_aexpr()?;
        self.consume(TokenKind::Semicolon, "expected ';' after return value")?;
        Ok(ast::Stmt::Return { value })
    }

    // call_expr ["=" lvalue] ";"
    fn parse_call_statement(&mut self) -> Result<ast::Stmt, CompileError> {
        let call = self.parse_call_expr()?;

        if self.match_any(&[TokenKind::Assign]) {
            let target = self.parse_lvalue()?;
            self.consume(TokenKind::Semicolon, "expected ';' after assignment")?;
            return Ok(ast::Stmt::Assign(ast::Assign {
                value: ast::Expr::Call(call),
                target,
            }));
        }

        self.consume(TokenKind::Semicolon, "expected ';' after call")?;
        Ok(ast::Stmt::Call(call))
    }

    // atom [arith_op atom] "=" lvalue
    fn parse_assign(&mut self) -> Result<ast::Assign, CompileError> {
        let value = self.parse_arith()?;
        self.consume(TokenKind::Assign, "expected '=' after expression")?;
        let target = self.parse_lvalue()?;
        Ok(ast::Assign { value, target })
    }

    // lvalue = IDENT ("[" aexpr "]")*
    fn parse_lvalue(&mut self) -> Result<ast::LValue, CompileError> {
        let name = self.consume(TokenKind::Identifier, "expected assignment target")?;
        let indices = self.parse_indices()?;
        Ok(ast::LValue { name, indices })
    }

    // "if" "(" cond ")" block ("or" "if" "(" cond ")" block)* ["else" block]
    fn parse_if(&mut self) -> Result<ast::Stmt, CompileError> {
        self.consume(TokenKind::If, "expected 'if'")?;
        let arm = self.parse_if_arm()?;

        let mut alternates = Vec::new();
        while self.match_any(&[TokenKind::Or]) {
            self.consume(TokenKind::If, "expected 'if' after 'or'")?;
            alternates.push(self.parse_if_arm()?);
        }

        let otherwise = if self.match_any(&[TokenKind::Else]) {
            Some(self.parse_block("expected '{' after 'else'")?)
        } else {
            None
        };

        Ok(ast::Stmt::If(ast::IfStmt {
            arm,
            alternates,
            otherwise,
        }))
    }

    fn parse_if_arm(&mut self) -> Result<ast::IfArm, CompileError> {
        self.consume(TokenKind::LParen, "expected '(' after 'if'")?;
        let condition = self.parse_condition()?;
        self.consume(TokenKind::RParen, "expected ')' after condition")?;
        let body = self.parse_block("expected '{' before if body")?;
        Ok(ast::IfArm { condition, body })
    }

    // range:   "for" "(" IDENT "moves" "from" aexpr "to" aexpr ")" block
    // classic: "for" "(" var_decl cond ";" step ")" block
    fn parse_for(&mut self) -> Result<ast::Stmt, CompileError> {
        self.consume(TokenKind::For, "expected 'for'")?;
        self.consume(TokenKind::LParen, "expected '(' after 'for'")?;

        let kind = self.peek().kind;
        if kind == TokenKind::Identifier {
            return self.parse_range_for();
        }
        if starts_var_decl(kind) {
            return self.parse_classic_for();
        }

        Err(self.error_at_current("expected loop variable or declaration after '('"))
    }

    fn parse_range_for(&mut self) -> Result<ast::Stmt, CompileError> {
        let var = self.consume(TokenKind::Identifier, "expected loop variable")?;
        self.consume(TokenKind::Moves, "expected 'moves' after loop variable")?;
        self.consume(TokenKind::From, "expected 'from' after 'moves'")?;
        let from = self.parse_aexpr()?;
        self.consume(TokenKind::To, "expected 'to' after start bound")?;
        let to = self.parse_aexpr()?;
        self.consume(TokenKind::RParen, "expected ')' after loop range")?;
        let body = self.parse_block("expected '{' before loop body")?;

        Ok(ast::Stmt::For {
            var,
            from,
            to,
            body,
        })
    }

    fn parse_classic_for(&mut self) -> Result<ast::Stmt, CompileError> {
        let init = self.parse_var_decl()?;
        let condition = self.parse_condition()?;
        self.consume(TokenKind::Semicolon, "expected ';' after loop condition")?;
        let step = self.parse_step()?;
        self.consume(TokenKind::RParen, "expected ')' after loop step")?;
        let body = self.parse_block("expected '{' before loop body")?;

        Ok(ast::Stmt::ForClassic {
            init,
            condition,
            step,
            body,
        })
    }

    // step = call_expr "=" lvalue | atom [arith_op atom] "=" lvalue
    fn parse_step(&mut self) -> Result<ast::Assign, CompileError> {
        if !self.check(TokenKind::Call) {
            return self.parse_assign();
        }

        let call = self.parse_call_expr()?;
        self.consume(TokenKind::Assign, "expected '=' after call in loop step")?;
        let target = self.parse_lvalue()?;
        Ok(ast::Assign {
            value: ast::Expr::Call(call),
            target,
        })
    }

    // "while" "(" cond ")" block
    fn parse_while(&mut self) -> Result<ast::Stmt, CompileError> {
        self.consume(TokenKind::While, "expected 'while'")?;
        self.consume(TokenKind::LParen, "expected '(' after 'while'")?;
        let condition = self.parse_condition()?;
        self.consume(TokenKind::RParen, "expected ')' after condition")?;
        let body = self.parse_block("expected '{' before loop body")?;
        Ok(ast::Stmt::While { condition, body })
    }

    // ===== expressions =====

    // cond = aexpr rel_op aexpr
    fn parse_condition(&mut self) -> Result<ast::Expr, CompileError> {
        let left = self.parse_aexpr()?;
        let op = self.consume_one_of("expected relational operator", &REL_OPS)?;
        let right = self.parse_aexpr()?;
        Ok(ast::Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    // aexpr = call_expr | atom [arith_op atom]
    fn parse_aexpr(&mut self) -> Result<ast::Expr, CompileError> {
        if !self.check(TokenKind::Call) {
            return self.parse_arith();
        }

        let call = self.parse_call_expr()?;
        if self.check_any(&ARITH_OPS) {
            return Err(self.error_at_current("a call cannot be an arithmetic operand"));
        }
        Ok(ast::Expr::Call(call))
    }

    // atom [arith_op atom]; a second operator is rejected, not re-associated
    fn parse_arith(&mut self) -> Result<ast::Expr, CompileError> {
        let left = self.parse_atom()?;

        if !self.match_any(&ARITH_OPS) {
            return Ok(left);
        }
        let op = self.previous().clone();
        let right = self.parse_atom()?;

        if self.check_any(&ARITH_OPS) {
            return Err(self.error_at_current("chained arithmetic operators need parentheses"));
        }

        Ok(ast::Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    // atom = INT | IDENT ("[" aexpr "]")* | "(" aexpr ")"
    fn parse_atom(&mut self) -> Result<ast::Expr, CompileError> {
        match self.peek().kind {
            TokenKind::IntLiteral => {
                let token = self.advance();
                let value = match token.literal {
                    Some(Literal::Int(value)) => value,
                    None => return Err(syntax_error(&token, "integer literal without a value")),
                };
                Ok(ast::Expr::Literal { token, value })
            }
            TokenKind::Identifier => {
                let name = self.advance();
                let indices = self.parse_indices()?;
                if indices.is_empty() {
                    Ok(ast::Expr::Ident { name })
                } else {
                    Ok(ast::Expr::Index { name, indices })
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_aexpr()?;
                self.consume(TokenKind::RParen, "expected ')' after expression")?;
                Ok(ast::Expr::Grouping {
                    inner: Box::new(inner),
                })
            }
            _ => Err(self.error_at_current("expected expression")),
        }
    }

    // call_expr = "call" IDENT "(" [aexpr ("," aexpr)*] ")"
    fn parse_call_expr(&mut self) -> Result<ast::CallExpr, CompileError> {
        let call = self.consume(TokenKind::Call, "expected 'call'")?;
        let callee = self.consume(TokenKind::Identifier, "expected function name after 'call'")?;
        self.consume(TokenKind::LParen, "expected '(' after function name")?;

        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            args.push(self.parse_aexpr()?);
            while self.match_any(&[TokenKind::Comma]) {
                args.push(self.parse_aexpr()?);
            }
        }
        self.consume(TokenKind::RParen, "expected ')' after arguments")?;

        Ok(ast::CallExpr { call, callee, args })
    }

    // ("[" aexpr "]")*
    fn parse_indices(&mut self) -> Result<Vec<ast::Expr>, CompileError> {
        let mut indices = Vec::new();
        while self.match_any(&[TokenKind::LBracket]) {
            indices.push(self.parse_aexpr()?);
            self.consume(TokenKind::RBracket, "expected ']' after index")?;
        }
        Ok(indices)
    }

    // ===== utilities =====

    fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    /// Returns the current token and moves past it. `Eof` is never passed.
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn check(&self, kind: TokenKind) -> bool {
        if self.is_at_end() {
            return kind == TokenKind::Eof;
        }
        self.peek().kind == kind
    }

    fn check_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.iter().any(|&kind| self.check(kind))
    }

    fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        if self.is_at_end() || !self.check_any(kinds) {
            return false;
        }
        self.advance();
        true
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<Token, CompileError> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(self.error_at_current(message))
    }

    fn consume_one_of(&mut self, message: &str, kinds: &[TokenKind]) -> Result<Token, CompileError> {
        if !self.is_at_end() && self.check_any(kinds) {
            return Ok(self.advance());
        }
        Err(self.error_at_current(message))
    }

    fn error_at_current(&self, message: &str) -> CompileError {
        syntax_error(self.peek(), message)
    }
}

fn syntax_error(token: &Token, message: &str) -> CompileError {
    let found = if token.kind == TokenKind::Eof {
        "end of input".to_string()
    } else {
        format!("'{}'", token.escaped_lexeme())
    };

    CompileError::SyntaxError {
        message: message.to_string(),
        found,
        line: token.line(),
        column: token.column(),
    }
}

fn starts_type(kind: TokenKind) -> bool {
    kind.is_type_keyword() || kind == TokenKind::Array
}

fn starts_var_decl(kind: TokenKind) -> bool {
    starts_type(kind)
}

fn starts_statement(kind: TokenKind) -> bool {
    starts_var_decl(kind)
        || matches!(
            kind,
            TokenKind::Return
                | TokenKind::Call
                | TokenKind::If
                | TokenKind::For
                | TokenKind::While
                | TokenKind::IntLiteral
                | TokenKind::Identifier
                | TokenKind::LParen
        )
}

fn type_kind(kind: TokenKind) -> ast::TypeKind {
    match kind {
        TokenKind::Float => ast::TypeKind::Float,
        TokenKind::Char => ast::TypeKind::Char,
        TokenKind::String => ast::TypeKind::String,
        TokenKind::Bool => ast::TypeKind::Bool,
        _ => ast::TypeKind::Int,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn parse_ok(source: &str) -> ast::Program {
        parse(source).unwrap_or_else(|e| panic!("failed to parse {source:?}: {e}"))
    }

    fn syntax_message(source: &str) -> String {
        match parse(source) {
            Err(CompileError::SyntaxError { message, .. }) => message,
            other => panic!("expected syntax error for {source:?}, got {other:?}"),
        }
    }

    fn only_function(program: &ast::Program) -> &ast::FuncDef {
        match program.items.as_slice() {
            [ast::TopItem::Func(func)] => func,
            other => panic!("expected a single function, got {other:?}"),
        }
    }

    #[test]
    fn function_with_params_and_return_type() {
        let program = parse_ok("func int add(int a, array int[][] m) { return a + 1; }");
        let func = only_function(&program);

        assert_eq!(func.name.lexeme, "add");
        assert_eq!(func.return_type.kind, ast::TypeKind::Int);
        assert!(func.return_type.token.is_some());
        assert_eq!(func.params.len(), 2);
        assert_eq!(func.params[0].name.lexeme, "a");
        assert_eq!(func.params[0].ty.array_rank, 0);
        assert_eq!(func.params[1].ty.array_rank, 2);
        assert!(matches!(
            func.body.as_slice(),
            [ast::Stmt::Return {
                value: ast::Expr::Binary { .. }
            }]
        ));
    }

    #[test]
    fn function_without_type_returns_implicit_void() {
        let program = parse_ok("func main() { }");
        let func = only_function(&program);
        assert_eq!(func.return_type, ast::Type::implicit_void());
        assert!(func.params.is_empty());
        assert!(func.body.is_empty());
    }

    #[test]
    fn explicit_void_keeps_its_token() {
        let program = parse_ok("func void main() { }");
        let func = only_function(&program);
        assert_eq!(func.return_type.kind, ast::TypeKind::Void);
        assert_eq!(
            func.return_type.token.as_ref().map(|t| t.lexeme.as_str()),
            Some("void")
        );
    }

    #[test]
    fn array_declaration_with_nested_initializer() {
        let program = parse_ok("array int[2][2] m = {{1, 2}, {3, 4}}, n;");
        let decl = match program.items.as_slice() {
            [ast::TopItem::VarDecl(decl)] => decl,
            other => panic!("expected declaration, got {other:?}"),
        };

        assert_eq!(decl.dims.len(), 2);
        assert_eq!(decl.ty.array_rank, 2);
        let names: Vec<_> = decl.names.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(names, vec!["m", "n"]);

        let Some(ast::Initializer::List(rows)) = &decl.init else {
            panic!("expected list initializer");
        };
        assert_eq!(rows.len(), 2);
        assert!(matches!(&rows[1], ast::Initializer::List(cells) if cells.len() == 2));
    }

    #[test]
    fn initializer_depth_must_match_dimensions() {
        assert_eq!(
            syntax_message("array int[2] v = 3;"),
            "expected '{' to open array initializer"
        );
        assert_eq!(syntax_message("int x = {1};"), "expected expression");
    }

    #[test]
    fn array_marker_requires_dimension() {
        assert_eq!(
            syntax_message("array int v;"),
            "expected '[' after array element type"
        );
        assert_eq!(syntax_message("int[3] v;"), "expected variable name");
    }

    #[test]
    fn declaration_without_initializer() {
        let program = parse_ok("bool a, b;");
        let [ast::TopItem::VarDecl(decl)] = program.items.as_slice() else {
            panic!("expected declaration");
        };
        assert_eq!(decl.ty.kind, ast::TypeKind::Bool);
        assert_eq!(decl.names.len(), 2);
        assert!(decl.init.is_none());
    }

    #[test]
    fn assignment_flows_into_indexed_target() {
        let program = parse_ok("(a * 2) = grid[i][j + 1];");
        let [ast::TopItem::Stmt(ast::Stmt::Assign(assign))] = program.items.as_slice() else {
            panic!("expected assignment");
        };
        assert!(matches!(assign.value, ast::Expr::Grouping { .. }));
        assert_eq!(assign.target.name.lexeme, "grid");
        assert_eq!(assign.target.indices.len(), 2);
    }

    #[test]
    fn bare_call_statement() {
        let program = parse_ok("call show(x[0], 3 % 2);");
        let [ast::TopItem::Stmt(ast::Stmt::Call(call))] = program.items.as_slice() else {
            panic!("expected call statement");
        };
        assert_eq!(call.callee.lexeme, "show");
        assert!(matches!(call.args[0], ast::Expr::Index { .. }));
        assert!(matches!(call.args[1], ast::Expr::Binary { .. }));
    }

    #[test]
    fn if_chain_keeps_arm_order() {
        let program = parse_ok(
            "if (x < 1) { 1 = y; } or if (x < 2) { 2 = y; } or if (x < 3) { 3 = y; } else { 4 = y; }",
        );
        let [ast::TopItem::Stmt(ast::Stmt::If(chain))] = program.items.as_slice() else {
            panic!("expected if statement");
        };

        let bounds: Vec<i64> = chain
            .alternates
            .iter()
            .map(|arm| match &arm.condition {
                ast::Expr::Binary { right, .. } => match right.as_ref() {
                    ast::Expr::Literal { value, .. } => *value,
                    other => panic!("unexpected bound {other:?}"),
                },
                other => panic!("unexpected condition {other:?}"),
            })
            .collect();
        assert_eq!(bounds, vec![2, 3]);
        assert_eq!(chain.otherwise.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn else_before_or_if_is_rejected() {
        let err = parse("if (a < b) { } else { } or if (a > b) { }").unwrap_err();
        match err {
            CompileError::SyntaxError { found, .. } => assert_eq!(found, "'or'"),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn condition_requires_relational_operator() {
        assert_eq!(
            syntax_message("while (a + 1) { }"),
            "expected relational operator"
        );
    }

    #[test]
    fn chained_operators_are_rejected() {
        assert_eq!(
            syntax_message("a + b + c = x;"),
            "chained arithmetic operators need parentheses"
        );
        assert_eq!(
            syntax_message("func f() { return a * b - c; }"),
            "chained arithmetic operators need parentheses"
        );
        parse_ok("(a + b) + c = x;");
        parse_ok("a = x;");
    }

    #[test]
    fn call_is_not_an_arithmetic_operand() {
        assert_eq!(
            syntax_message("func f() { return call g() + 1; }"),
            "a call cannot be an arithmetic operand"
        );
    }

    #[test]
    fn classic_for_loop() {
        let program = parse_ok("for (int i = 0; i < n; i + 1 = i) { call tick(i); }");
        let [ast::TopItem::Stmt(ast::Stmt::ForClassic {
            init,
            condition,
            step,
            body,
        })] = program.items.as_slice()
        else {
            panic!("expected classic for");
        };

        assert_eq!(init.names[0].lexeme, "i");
        assert!(matches!(condition, ast::Expr::Binary { op, .. } if op.kind == TokenKind::Less));
        assert_eq!(step.target.name.lexeme, "i");
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn range_for_loop() {
        let program = parse_ok("for (i moves from 0 to call len(xs)) { i = last; }");
        let [ast::TopItem::Stmt(ast::Stmt::For { var, from, to, body })] =
            program.items.as_slice()
        else {
            panic!("expected range for");
        };
        assert_eq!(var.lexeme, "i");
        assert!(matches!(from, ast::Expr::Literal { value: 0, .. }));
        assert!(matches!(to, ast::Expr::Call(_)));
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn while_loop_nests_blocks() {
        let program = parse_ok(
            "func f(int n) { while (n > 0) { if (n == 3) { return n; } n - 1 = n; } return 0; }",
        );
        let func = only_function(&program);
        assert_eq!(func.body.len(), 2);
        let ast::Stmt::While { body, .. } = &func.body[0] else {
            panic!("expected while");
        };
        assert!(matches!(body[0], ast::Stmt::If(_)));
        assert!(matches!(body[1], ast::Stmt::Assign(_)));
    }

    #[test]
    fn return_inside_top_level_if() {
        let program = parse_ok("if ( a < b ) { return a; } else { return b; }");
        let [ast::TopItem::Stmt(ast::Stmt::If(chain))] = program.items.as_slice() else {
            panic!("expected if statement");
        };

        assert!(matches!(
            &chain.arm.condition,
            ast::Expr::Binary { op, .. } if op.kind == TokenKind::Less
        ));
        assert!(matches!(
            chain.arm.body.as_slice(),
            [ast::Stmt::Return { value: ast::Expr::Ident { name } }] if name.lexeme == "a"
        ));
        assert!(chain.alternates.is_empty());
        assert!(matches!(
            chain.otherwise.as_deref(),
            Some([ast::Stmt::Return { value: ast::Expr::Ident { name } }]) if name.lexeme == "b"
        ));

        assert_eq!(
            syntax_message("return 1;"),
            "expected declaration or statement"
        );
    }

    #[test]
    fn void_is_only_a_return_type() {
        assert_eq!(
            syntax_message("void x;"),
            "expected declaration or statement"
        );
        assert_eq!(
            syntax_message("func f(void p) { }"),
            "expected type name"
        );
        assert_eq!(
            syntax_message("func f() { void x; }"),
            "expected '}' to close block"
        );
        assert_eq!(
            syntax_message("for (void i = 0; i < 3; i + 1 = i) { }"),
            "expected loop variable or declaration after '('"
        );
        assert_eq!(
            syntax_message("func array void[] f() { }"),
            "expected type name"
        );
    }

    #[test]
    fn unexpected_end_of_input() {
        let err = parse("func f() { 1 = x;").unwrap_err();
        match err {
            CompileError::SyntaxError {
                message,
                found,
                line,
                column,
            } => {
                assert_eq!(message, "expected '}' to close block");
                assert_eq!(found, "end of input");
                assert_eq!((line, column), (1, 18));
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn stray_token_at_top_level() {
        assert_eq!(
            syntax_message("; int x;"),
            "expected declaration or statement"
        );
        assert_eq!(syntax_message("!"), "expected declaration or statement");
    }

    #[test]
    fn missing_eof_is_supplied() {
        let tokens = vec![
            Token::new(TokenKind::Identifier, "a", Span::new(1, 1, 1)),
            Token::new(TokenKind::Assign, "=", Span::new(1, 3, 3)),
            Token::new(TokenKind::Identifier, "b", Span::new(1, 5, 5)),
        ];
        let err = parse_tokens(tokens).unwrap_err();
        match err {
            CompileError::SyntaxError { found, column, .. } => {
                assert_eq!(found, "end of input");
                assert_eq!(column, 6);
            }
            other => panic!("expected syntax error, got {other:?}"),
        }

        assert_eq!(parse_tokens(Vec::new()).unwrap().items.len(), 0);
    }
}
