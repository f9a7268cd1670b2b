use serde_json::{Value, json};

use crate::error::EmitError;
use crate::ir::ast;
use crate::parser::token::Token;

use super::Backend;

/// Serializes the AST as pretty-printed JSON.
pub struct JsonBackend;

impl Backend for JsonBackend {
    fn emit(&mut self, program: &ast::Program) -> Result<String, EmitError> {
        let value = program_to_json(program);
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

pub fn program_to_json(program: &ast::Program) -> Value {
    let items: Vec<Value> = program.items.iter().map(top_item).collect();
    json!({
        "type": "program",
        "items": items,
    })
}

fn top_item(item: &ast::TopItem) -> Value {
    match item {
        ast::TopItem::VarDecl(decl) => json!({
            "kind": "topVarDecl",
            "decl": var_decl(decl),
        }),
        ast::TopItem::Stmt(s) => json!({
            "kind": "topStmt",
            "stmt": stmt(s),
        }),
        ast::TopItem::Func(func) => {
            let params: Vec<Value> = func
                .params
                .iter()
                .map(|p| {
                    json!({
                        "name": p.name.lexeme,
                        "type": ty(&p.ty),
                    })
                })
                .collect();
            json!({
                "kind": "funcDef",
                "name": func.name.lexeme,
                "pos": pos(&func.name),
                "returnType": ty(&func.return_type),
                "params": params,
                "body": block(&func.body),
            })
        }
    }
}

fn ty(t: &ast::Type) -> Value {
    let base = match &t.token {
        Some(token) => token.lexeme.clone(),
        None => "implicit void".to_string(),
    };
    json!({
        "base": base,
        "rank": t.array_rank,
    })
}

fn pos(token: &Token) -> Value {
    json!([token.span.line, token.span.col_start, token.span.col_end])
}

fn block(stmts: &[ast::Stmt]) -> Value {
    Value::Array(stmts.iter().map(stmt).collect())
}

fn exprs(list: &[ast::Expr]) -> Value {
    Value::Array(list.iter().map(expr).collect())
}

fn var_decl(decl: &ast::VarDecl) -> Value {
    let names: Vec<&str> = decl.names.iter().map(|t| t.lexeme.as_str()).collect();
    json!({
        "stmt": "varDecl",
        "type": ty(&decl.ty),
        "dims": exprs(&decl.dims),
        "names": names,
        "init": decl.init.as_ref().map(initializer),
    })
}

fn initializer(init: &ast::Initializer) -> Value {
    match init {
        ast::Initializer::Expr(e) => expr(e),
        ast::Initializer::List(items) => Value::Array(items.iter().map(initializer).collect()),
    }
}

fn lvalue(lv: &ast::LValue) -> Value {
    json!({
        "name": lv.name.lexeme,
        "indices": exprs(&lv.indices),
    })
}

fn assign(a: &ast::Assign) -> Value {
    json!({
        "stmt": "assign",
        "left": expr(&a.value),
        "lvalue": lvalue(&a.target),
    })
}

fn arm(a: &ast::IfArm) -> Value {
    json!({
        "cond": expr(&a.condition),
        "block": block(&a.body),
    })
}

fn stmt(s: &ast::Stmt) -> Value {
    match s {
        ast::Stmt::VarDecl(decl) => var_decl(decl),
        ast::Stmt::Return { value } => json!({
            "stmt": "return",
            "expr": expr(value),
        }),
        ast::Stmt::Assign(a) => assign(a),
        ast::Stmt::Call(call) => json!({
            "stmt": "call",
            "call": call_expr(call),
        }),
        ast::Stmt::If(chain) => {
            let alternates: Vec<Value> = chain.alternates.iter().map(arm).collect();
            json!({
                "stmt": "begin_if",
                "if": arm(&chain.arm),
                "or_if": alternates,
                "else": chain.otherwise.as_deref().map(block),
            })
        }
        ast::Stmt::For {
            var,
            from,
            to,
            body,
        } => json!({
            "stmt": "begin_for",
            "var": var.lexeme,
            "from": expr(from),
            "to": expr(to),
            "body": block(body),
        }),
        ast::Stmt::ForClassic {
            init,
            condition,
            step,
            body,
        } => json!({
            "stmt": "begin_for_classic",
            "init": var_decl(init),
            "cond": expr(condition),
            "step": assign(step),
            "body": block(body),
        }),
        ast::Stmt::While { condition, body } => json!({
            "stmt": "begin_while",
            "cond": expr(condition),
            "body": block(body),
        }),
    }
}

fn call_expr(call: &ast::CallExpr) -> Value {
    json!({
        "type": "call",
        "name": call.callee.lexeme,
        "pos": pos(&call.call),
        "args": exprs(&call.args),
    })
}

fn expr(e: &ast::Expr) -> Value {
    match e {
        ast::Expr::Literal { token, value } => json!({
            "type": "literal",
            "value": value,
            "pos": pos(token),
        }),
        ast::Expr::Ident { name } => json!({
            "type": "ident",
            "name": name.lexeme,
            "pos": pos(name),
        }),
        ast::Expr::Index { name, indices } => json!({
            "type": "index",
            "name": name.lexeme,
            "pos": pos(name),
            "indices": exprs(indices),
        }),
        ast::Expr::Grouping { inner } => json!({
            "type": "group",
            "expr": expr(inner),
        }),
        ast::Expr::Call(call) => call_expr(call),
        ast::Expr::Binary { left, op, right } => json!({
            "type": "binary",
            "op": op.lexeme,
            "left": expr(left),
            "right": expr(right),
        }),
    }
}
