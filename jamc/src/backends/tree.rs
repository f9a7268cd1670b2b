use crate::error::EmitError;
use crate::ir::ast;

use super::Backend;

/// Indented text tree, one node per line.
pub struct TreeBackend {
    out: String,
    depth: usize,
}

impl Backend for TreeBackend {
    fn emit(&mut self, program: &ast::Program) -> Result<String, EmitError> {
        self.out.clear();
        self.depth = 0;
        self.program(program);
        Ok(std::mem::take(&mut self.out))
    }
}

impl TreeBackend {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn nested(&mut self, label: &str, f: impl FnOnce(&mut Self)) {
        self.line(label);
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    fn program(&mut self, program: &ast::Program) {
        self.nested("Program", |w| {
            for item in &program.items {
                w.top_item(item);
            }
        });
    }

    fn top_item(&mut self, item: &ast::TopItem) {
        match item {
            ast::TopItem::VarDecl(decl) => self.var_decl(decl),
            ast::TopItem::Stmt(s) => self.stmt(s),
            ast::TopItem::Func(func) => {
                let label = format!(
                    "FuncDef {} -> {}",
                    func.name.lexeme,
                    type_name(&func.return_type)
                );
                self.nested(&label, |w| {
                    for param in &func.params {
                        w.line(&format!("Param {}: {}", param.name.lexeme, type_name(&param.ty)));
                    }
                    w.block("Body", &func.body);
                });
            }
        }
    }

    fn block(&mut self, label: &str, stmts: &[ast::Stmt]) {
        self.nested(label, |w| {
            for s in stmts {
                w.stmt(s);
            }
        });
    }

    fn var_decl(&mut self, decl: &ast::VarDecl) {
        let names: Vec<&str> = decl.names.iter().map(|t| t.lexeme.as_str()).collect();
        let label = format!("VarDecl {} {}", type_name(&decl.ty), names.join(", "));
        self.nested(&label, |w| {
            if !decl.dims.is_empty() {
                w.nested("Dims", |w| {
                    for dim in &decl.dims {
                        w.expr(dim);
                    }
                });
            }
            if let Some(init) = &decl.init {
                w.nested("Init", |w| w.initializer(init));
            }
        });
    }

    fn initializer(&mut self, init: &ast::Initializer) {
        match init {
            ast::Initializer::Expr(e) => self.expr(e),
            ast::Initializer::List(items) => self.nested("List", |w| {
                for item in items {
                    w.initializer(item);
                }
            }),
        }
    }

    fn assign(&mut self, a: &ast::Assign) {
        self.nested("Assign", |w| {
            w.expr(&a.value);
            w.lvalue(&a.target);
        });
    }

    fn lvalue(&mut self, lv: &ast::LValue) {
        let label = format!("Target {}", lv.name.lexeme);
        if lv.indices.is_empty() {
            self.line(&label);
            return;
        }
        self.nested(&label, |w| {
            for index in &lv.indices {
                w.expr(index);
            }
        });
    }

    fn arm(&mut self, label: &str, a: &ast::IfArm) {
        self.nested(label, |w| {
            w.expr(&a.condition);
            w.block("Then", &a.body);
        });
    }

    fn stmt(&mut self, s: &ast::Stmt) {
        match s {
            ast::Stmt::VarDecl(decl) => self.var_decl(decl),
            ast::Stmt::Return { value } => self.nested("Return", |w| w.expr(value)),
            ast::Stmt::Assign(a) => self.assign(a),
            ast::Stmt::Call(call) => self.nested("CallStmt", |w| w.call(call)),
            ast::Stmt::If(chain) => self.nested("If", |w| {
                w.arm("Arm", &chain.arm);
                for alternate in &chain.alternates {
                    w.arm("OrIf", alternate);
                }
                if let Some(otherwise) = &chain.otherwise {
                    w.block("Else", otherwise);
                }
            }),
            ast::Stmt::For {
                var,
                from,
                to,
                body,
            } => self.nested(&format!("For {}", var.lexeme), |w| {
                w.nested("From", |w| w.expr(from));
                w.nested("To", |w| w.expr(to));
                w.block("Body", body);
            }),
            ast::Stmt::ForClassic {
                init,
                condition,
                step,
                body,
            } => self.nested("ForClassic", |w| {
                w.var_decl(init);
                w.expr(condition);
                w.assign(step);
                w.block("Body", body);
            }),
            ast::Stmt::While { condition, body } => self.nested("While", |w| {
                w.expr(condition);
                w.block("Body", body);
            }),
        }
    }

    fn call(&mut self, call: &ast::CallExpr) {
        let label = format!("Call {}", call.callee.lexeme);
        if call.args.is_empty() {
            self.line(&label);
            return;
        }
        self.nested(&label, |w| {
            for arg in &call.args {
                w.expr(arg);
            }
        });
    }

    fn expr(&mut self, e: &ast::Expr) {
        match e {
            ast::Expr::Literal { value, .. } => self.line(&format!("Literal {}", value)),
            ast::Expr::Ident { name } => self.line(&format!("Ident {}", name.lexeme)),
            ast::Expr::Index { name, indices } => {
                self.nested(&format!("Index {}", name.lexeme), |w| {
                    for index in indices {
                        w.expr(index);
                    }
                });
            }
            ast::Expr::Grouping { inner } => self.nested("Group", |w| w.expr(inner)),
            ast::Expr::Call(call) => self.call(call),
            ast::Expr::Binary { left, op, right } => {
                self.nested(&format!("Binary {}", op.lexeme), |w| {
                    w.expr(left);
                    w.expr(right);
                });
            }
        }
    }
}

impl Default for TreeBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn type_name(t: &ast::Type) -> String {
    let mut name = t.kind.name().to_string();
    for _ in 0..t.array_rank {
        name.push_str("[]");
    }
    name
}
