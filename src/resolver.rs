use std::collections::HashMap;

use crate::error::{Error, ResolveError};
use crate::expr::{Expr, ExprVisitor};
use crate::interpreter::Interpreter;
use crate::stmt::{FunctionData, Stmt, StmtVisitor};
use crate::token::Token;

/// What kind of function body is being resolved, if any.
#[derive(Clone, Copy)]
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

/// What kind of class body is being resolved, if any.
#[derive(Clone, Copy)]
enum ClassType {
    None,
    Class,
    Subclass,
}

/// State of a name within a scope. A variable is `Declared` while its own
/// initializer is being resolved, and only becomes readable once `Defined`.
enum Binding {
    Declared,
    Defined,
}

/// Static pass over the AST, run between the parser and the evaluator.
///
/// It walks every node once, carrying a stack of lexical scopes. For each
/// local variable reference it counts how many scopes lie between the
/// reference and the declaration it binds to, and hands that hop count to
/// the interpreter's side table. References that match no scope are left
/// unrecorded and fall through to the globals environment at runtime; the
/// empty stack therefore stands for the global scope.
///
/// The same walk rejects scope-sensitive constructs the parser cannot see:
/// `this` or `super` outside a class, `return` outside a function, a value
/// returned from an initializer, a local read in its own initializer, a
/// local redeclaration, and a class inheriting from itself. Resolution
/// keeps going after an error so one run reports them all.
pub struct Resolver<'a, 'b> {
    interpreter: &'a mut Interpreter<'b>,
    scopes: Vec<HashMap<String, Binding>>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl<'a, 'b> Resolver<'a, 'b> {
    pub fn new(interpreter: &'a mut Interpreter<'b>) -> Self {
        Resolver {
            interpreter,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    pub fn resolve(&mut self, statements: &[Stmt]) {
        statements.iter().for_each(|statement| self.resolve_stmt(statement));
    }

    fn resolve_stmt(&mut self, statement: &Stmt) {
        statement.accept(self);
    }

    fn resolve_expr(&mut self, expression: &Expr) {
        expression.accept(self);
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Opens a scope holding a single pre-defined binding. Class bodies use
    /// this for the scopes that carry `this` and `super`.
    fn begin_scope_with(&mut self, name: &str) {
        let mut scope = HashMap::new();
        scope.insert(name.to_string(), Binding::Defined);
        self.scopes.push(scope);
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Marks a name as declared but not yet readable in the innermost
    /// scope. Global declarations are not tracked and may repeat; a local
    /// name may only be declared once per scope.
    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if scope.insert(name.lexeme.clone(), Binding::Declared).is_some() {
            ResolveError {
                token: name.clone(),
                message: "Variable with this name already declared in this scope.".to_string(),
            }.throw();
        }
    }

    /// Marks a declared name as readable.
    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), Binding::Defined);
        }
    }

    /// Records how many scopes lie between a reference and the declaration
    /// it binds to, keyed by the reference's token. A miss means the name
    /// is global and nothing is recorded.
    fn resolve_local(&mut self, name: &Token) {
        let depth = self.scopes.iter().rev()
            .position(|scope| scope.contains_key(&name.lexeme));

        if let Some(depth) = depth {
            self.interpreter.resolve(name, depth);
        }
    }

    /// Resolves a function or method body in its own scope, with the
    /// parameters pre-defined. The enclosing function kind is restored on
    /// the way out so nested declarations stack correctly.
    fn resolve_function(&mut self, declaration: &FunctionData, r#type: FunctionType) {
        let enclosing_function = self.current_function;
        self.current_function = r#type;

        self.begin_scope();
        declaration.params.iter().for_each(|param| {
            self.declare(param);
            self.define(param);
        });
        self.resolve(&declaration.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }
}

impl<'a, 'b> ExprVisitor<()> for Resolver<'a, 'b> {
    fn visit_variable_expr(&mut self, expr: &Expr) {
        let Expr::Variable(data) = expr else { unreachable!() };

        // `var a = a;` finds its own half-declared binding here.
        let binding = self.scopes.last().and_then(|scope| scope.get(&data.name.lexeme));
        if let Some(Binding::Declared) = binding {
            ResolveError {
                token: data.name.clone(),
                message: "Cannot read local variable in its own initializer.".to_string(),
            }.throw();
        }

        self.resolve_local(&data.name);
    }

    fn visit_assign_expr(&mut self, expr: &Expr) {
        let Expr::Assign(data) = expr else { unreachable!() };

        self.resolve_expr(&data.value);
        self.resolve_local(&data.name);
    }

    fn visit_this_expr(&mut self, expr: &Expr) {
        let Expr::This(data) = expr else { unreachable!() };

        match self.current_class {
            ClassType::None => ResolveError {
                token: data.keyword.clone(),
                message: "Cannot use 'this' outside of a class".to_string(),
            }.throw(),
            _ => self.resolve_local(&data.keyword),
        }
    }

    fn visit_super_expr(&mut self, expr: &Expr) {
        let Expr::Super(data) = expr else { unreachable!() };

        match self.current_class {
            ClassType::Subclass => (),
            ClassType::None => ResolveError {
                token: data.keyword.clone(),
                message: "Cannot use 'super' outside of a class".to_string(),
            }.throw(),
            ClassType::Class => ResolveError {
                token: data.keyword.clone(),
                message: "Cannot use 'super' in a class with no superclass".to_string(),
            }.throw(),
        }

        self.resolve_local(&data.keyword);
    }

    fn visit_literal_expr(&mut self, expr: &Expr) {
        let Expr::Literal(_) = expr else { unreachable!() };
    }

    fn visit_logical_expr(&mut self, expr: &Expr) {
        let Expr::Logical(data) = expr else { unreachable!() };

        self.resolve_expr(&data.left);
        self.resolve_expr(&data.right);
    }

    fn visit_unary_expr(&mut self, expr: &Expr) {
        let Expr::Unary(data) = expr else { unreachable!() };

        self.resolve_expr(&data.expr);
    }

    fn visit_binary_expr(&mut self, expr: &Expr) {
        let Expr::Binary(data) = expr else { unreachable!() };

        self.resolve_expr(&data.left);
        self.resolve_expr(&data.right);
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) {
        let Expr::Grouping(data) = expr else { unreachable!() };

        self.resolve_expr(&data.expr);
    }

    fn visit_call_expr(&mut self, expr: &Expr) {
        let Expr::Call(data) = expr else { unreachable!() };

        self.resolve_expr(&data.callee);
        data.arguments.iter().for_each(|argument| self.resolve_expr(argument));
    }

    fn visit_get_expr(&mut self, expr: &Expr) {
        let Expr::Get(data) = expr else { unreachable!() };

        // Properties are looked up dynamically; only the object resolves.
        self.resolve_expr(&data.object);
    }

    fn visit_set_expr(&mut self, expr: &Expr) {
        let Expr::Set(data) = expr else { unreachable!() };

        self.resolve_expr(&data.value);
        self.resolve_expr(&data.object);
    }
}

impl<'a, 'b> StmtVisitor<()> for Resolver<'a, 'b> {
    fn visit_var_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Var(data) = stmt else { unreachable!() };

        self.declare(&data.name);
        if let Some(initializer) = &data.initializer {
            self.resolve_expr(initializer);
        }
        self.define(&data.name);
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Function(data) = stmt else { unreachable!() };

        // Defined eagerly so the function can refer to itself recursively.
        self.declare(&data.name);
        self.define(&data.name);

        self.resolve_function(data, FunctionType::Function);
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Class(data) = stmt else { unreachable!() };

        let enclosing_class = self.current_class;
        self.current_class = ClassType::Class;

        self.declare(&data.name);
        self.define(&data.name);

        if let Some(superclass) = &data.superclass {
            let Expr::Variable(variable) = superclass else { unreachable!() };

            if variable.name.lexeme == data.name.lexeme {
                ResolveError {
                    token: variable.name.clone(),
                    message: "A class cannot inherit from itself".to_string(),
                }.throw();
            }

            self.current_class = ClassType::Subclass;
            self.resolve_expr(superclass);

            // Methods of a subclass resolve `super` one scope outside `this`.
            self.begin_scope_with("super");
        }

        self.begin_scope_with("this");

        for method in &data.methods {
            let Stmt::Function(declaration) = method else { unreachable!() };

            let r#type = match declaration.name.lexeme.as_str() {
                "init" => FunctionType::Initializer,
                _ => FunctionType::Method,
            };
            self.resolve_function(declaration, r#type);
        }

        self.end_scope();

        if data.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Return(data) = stmt else { unreachable!() };

        if let FunctionType::None = self.current_function {
            ResolveError {
                token: data.keyword.clone(),
                message: "Cannot return from top-level code".to_string(),
            }.throw();
        }

        let Some(value) = &data.value else { return };

        if let FunctionType::Initializer = self.current_function {
            ResolveError {
                token: data.keyword.clone(),
                message: "Cannot return a value from an initializer".to_string(),
            }.throw();
            return;
        }

        self.resolve_expr(value);
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Block(data) = stmt else { unreachable!() };

        self.begin_scope();
        self.resolve(&data.statements);
        self.end_scope();
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) {
        let Stmt::If(data) = stmt else { unreachable!() };

        self.resolve_expr(&data.condition);
        self.resolve_stmt(&data.then_branch);
        if let Some(else_branch) = &data.else_branch {
            self.resolve_stmt(else_branch);
        }
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) {
        let Stmt::While(data) = stmt else { unreachable!() };

        self.resolve_expr(&data.condition);
        self.resolve_stmt(&data.body);
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Print(data) = stmt else { unreachable!() };

        self.resolve_expr(&data.expr);
    }

    fn visit_expression_stmt(&mut self, stmt: &Stmt) {
        let Stmt::Expression(data) = stmt else { unreachable!() };

        self.resolve_expr(&data.expr);
    }
}
