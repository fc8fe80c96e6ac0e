use crate::ast::{ElifClause, Expr, LiteralValue, LogicalOp, Stmt, UnaryOp};

/// Renders parsed programs in a parenthesised prefix form, one top-level
/// statement per line. Literal forms read back as the same literal.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(expr: &Expr) -> String {
        match expr {
            // ── literals ────────────────────────────────────────────────
            Expr::Literal(lit) => Self::literal(lit),

            // ── grouping ────────────────────────────────────────────────
            Expr::Grouping(inner) => format!("(group {})", Self::print(inner)),

            // ── operators ───────────────────────────────────────────────
            Expr::Unary {
                operator, right, ..
            } => {
                let symbol: &str = match operator {
                    UnaryOp::Not => "!",
                    UnaryOp::Negate => "-",
                };

                format!("({} {})", symbol, Self::print(right))
            }

            Expr::Binary {
                left,
                operator,
                right,
                ..
            } => format!(
                "({} {} {})",
                operator.symbol(),
                Self::print(left),
                Self::print(right)
            ),

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let keyword: &str = match operator {
                    LogicalOp::And => "and",
                    LogicalOp::Or => "or",
                };

                format!("({} {} {})", keyword, Self::print(left), Self::print(right))
            }

            Expr::Membership {
                left,
                negated,
                right,
                ..
            } => format!(
                "({} {} {})",
                if *negated { "not in" } else { "in" },
                Self::print(left),
                Self::print(right)
            ),

            Expr::PostfixIncDec { name, operator, .. } => {
                format!("(post{} {})", operator.symbol(), name)
            }

            // ── names, calls, lists ─────────────────────────────────────
            Expr::Variable { name, .. } => name.clone(),

            Expr::Assign { name, value, .. } => format!("(= {} {})", name, Self::print(value)),

            Expr::Call {
                callee, arguments, ..
            } => {
                let mut s: String = format!("(call {}", Self::print(callee));
                for arg in arguments {
                    s.push(' ');
                    s.push_str(&Self::print(arg));
                }
                s.push(')');
                s
            }

            Expr::Index { object, index, .. } => {
                format!("(index {} {})", Self::print(object), Self::print(index))
            }

            Expr::Slice {
                object, start, end, ..
            } => {
                let bound = |b: &Option<Box<Expr>>| b.as_deref().map_or("_".to_string(), Self::print);

                format!("(slice {} {} {})", Self::print(object), bound(start), bound(end))
            }

            Expr::MethodCall {
                receiver,
                method,
                arguments,
                ..
            } => {
                let mut s: String = format!("(.{} {}", method.name(), receiver);
                for arg in arguments {
                    s.push(' ');
                    s.push_str(&Self::print(arg));
                }
                s.push(')');
                s
            }

            Expr::List { items, .. } => {
                let mut s: String = String::from("(list");
                for item in items {
                    s.push(' ');
                    s.push_str(&Self::print(item));
                }
                s.push(')');
                s
            }
        }
    }

    /// Source text that scans back to the same literal.
    pub fn literal(lit: &LiteralValue) -> String {
        match lit {
            LiteralValue::True => "true".into(),

            LiteralValue::False => "false".into(),

            LiteralValue::Null => "null".into(),

            LiteralValue::Str(s) => format!("\"{}\"", s),

            LiteralValue::Number(n) => {
                if n.fract() == 0.0 {
                    // 3 → 3.0
                    format!("{:.1}", n)
                } else {
                    n.to_string()
                }
            }
        }
    }

    pub fn print_stmt(stmt: &Stmt) -> String {
        match stmt {
            Stmt::Var { name, initializer } => match initializer {
                Some(expr) => format!("(let {} {})", name, Self::print(expr)),
                None => format!("(let {})", name),
            },

            Stmt::Expression(expr) => format!("(expr {})", Self::print(expr)),

            Stmt::Print(expr) => format!("(print {})", Self::print(expr)),

            Stmt::Return { value, .. } => match value {
                Some(expr) => format!("(return {})", Self::print(expr)),
                None => "(return)".into(),
            },

            Stmt::If {
                condition,
                then_branch,
                elif_branches,
                else_branch,
            } => {
                let mut s: String = format!(
                    "(if {} {}",
                    Self::print(condition),
                    Self::block(then_branch)
                );
                for ElifClause { condition, body } in elif_branches {
                    s.push_str(&format!(
                        " (elif {} {})",
                        Self::print(condition),
                        Self::block(body)
                    ));
                }
                if let Some(body) = else_branch {
                    s.push_str(&format!(" (else {})", Self::block(body)));
                }
                s.push(')');
                s
            }

            Stmt::While { condition, body } => {
                format!("(while {} {})", Self::print(condition), Self::block(body))
            }

            Stmt::For {
                variable,
                iterable,
                step,
                body,
                ..
            } => match step {
                Some(step) => format!(
                    "(for {} {} (step {}) {})",
                    variable,
                    Self::print(iterable),
                    Self::print(step),
                    Self::block(body)
                ),
                None => format!(
                    "(for {} {} {})",
                    variable,
                    Self::print(iterable),
                    Self::block(body)
                ),
            },

            Stmt::Function(decl) => format!(
                "(def {} ({}) {})",
                decl.name,
                decl.params.join(" "),
                Self::block(&decl.body)
            ),
        }
    }

    /// One line per top-level statement.
    pub fn print_program(statements: &[Stmt]) -> String {
        statements
            .iter()
            .map(Self::print_stmt)
            .collect::<Vec<String>>()
            .join("\n")
    }

    fn block(statements: &[Stmt]) -> String {
        let mut s: String = String::from("(block");
        for stmt in statements {
            s.push(' ');
            s.push_str(&Self::print_stmt(stmt));
        }
        s.push(')');
        s
    }
}
