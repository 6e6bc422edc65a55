use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{Error, RuntimeError, Unwind};
use crate::expr::{Expr, ExprVisitor};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::{Token, Type};

type EvalResult = Result<Object, Unwind>;
type ExecResult = Result<(), Unwind>;

/// Evaluates the program by walking the AST.
///
/// Variable references that the resolver certified are read through the
/// side table of hop counts (`locals`); everything else falls through to
/// the globals environment.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<Token, usize>,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::get_globals() {
            let name = native.name.lexeme.clone();
            globals.borrow_mut().define(&name, Object::from(native));
        }

        Interpreter {
            globals: Rc::clone(&globals),
            environment: globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// Interprets a batch of statements.
    /// A runtime error abandons the rest of the batch but leaves the
    /// interpreter usable for the next one.
    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            if let Err(unwind) = self.execute(statement) {
                match unwind {
                    Unwind::Error(error) => error.throw(),
                    // The resolver rejects top-level returns.
                    Unwind::Return(_) => unreachable!(),
                }
                return;
            }
        }
    }

    /// Records the hop count for a resolver-certified reference.
    pub fn resolve(&mut self, name: &Token, depth: usize) {
        self.locals.insert(name.clone(), depth);
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        expr.accept(self)
    }

    /// Executes statements in the given environment, restoring the previous
    /// one afterwards on every exit path.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> ExecResult {
        let previous = mem::replace(&mut self.environment, environment);

        let result = statements.iter().try_for_each(|statement| self.execute(statement));

        self.environment = previous;
        result
    }

    /// Reads a variable through the resolution table, falling back to globals.
    fn look_up_variable(&self, name: &Token) -> EvalResult {
        match self.locals.get(name) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }.map_err(Unwind::from)
    }

    fn numbers_error(operator: &Token) -> Unwind {
        Unwind::Error(RuntimeError {
            token: operator.clone(),
            message: "Operands must be numbers".to_string(),
        })
    }
}

impl<'a> ExprVisitor<EvalResult> for Interpreter<'a> {
    fn visit_literal_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Literal(literal) = expr else { unreachable!() };

        Ok(Object::from(literal.clone()))
    }

    fn visit_logical_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Logical(logical) = expr else { unreachable!() };

        let left = self.evaluate(&logical.left)?;

        // Short-circuits yield the operand itself, not a coerced boolean.
        match logical.operator.r#type {
            Type::Or if left.is_truthy() => Ok(left),
            Type::And if !left.is_truthy() => Ok(left),
            _ => self.evaluate(&logical.right),
        }
    }

    fn visit_unary_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Unary(unary) = expr else { unreachable!() };

        let right = self.evaluate(&unary.expr)?;

        match unary.operator.r#type {
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            Type::Minus => (-right).ok_or_else(|| Unwind::Error(RuntimeError {
                token: unary.operator.clone(),
                message: "Operand must be a number".to_string(),
            })),
            _ => unreachable!(),
        }
    }

    fn visit_binary_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Binary(binary) = expr else { unreachable!() };

        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;

        match binary.operator.r#type {
            Type::Greater => match left.partial_cmp(&right) {
                Some(ordering) => Ok(Object::from(ordering == Ordering::Greater)),
                None => Err(Self::numbers_error(&binary.operator)),
            },
            Type::GreaterEqual => match left.partial_cmp(&right) {
                Some(ordering) => Ok(Object::from(ordering != Ordering::Less)),
                None => Err(Self::numbers_error(&binary.operator)),
            },
            Type::Less => match left.partial_cmp(&right) {
                Some(ordering) => Ok(Object::from(ordering == Ordering::Less)),
                None => Err(Self::numbers_error(&binary.operator)),
            },
            Type::LessEqual => match left.partial_cmp(&right) {
                Some(ordering) => Ok(Object::from(ordering != Ordering::Greater)),
                None => Err(Self::numbers_error(&binary.operator)),
            },
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            Type::Minus => (left - right).ok_or_else(|| Self::numbers_error(&binary.operator)),
            Type::Star => (left * right).ok_or_else(|| Self::numbers_error(&binary.operator)),
            Type::Slash => (left / right).ok_or_else(|| Self::numbers_error(&binary.operator)),
            Type::Plus => (left + right).ok_or_else(|| Unwind::Error(RuntimeError {
                token: binary.operator.clone(),
                message: "Operands must be two numbers or two strings.".to_string(),
            })),
            _ => unreachable!(),
        }
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Grouping(grouping) = expr else { unreachable!() };

        self.evaluate(&grouping.expr)
    }

    fn visit_variable_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Variable(variable) = expr else { unreachable!() };

        self.look_up_variable(&variable.name)
    }

    fn visit_assign_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Assign(assign) = expr else { unreachable!() };

        let value = self.evaluate(&assign.value)?;

        match self.locals.get(&assign.name) {
            Some(distance) => {
                self.environment.borrow_mut().assign_at(*distance, &assign.name, value.clone());
            },
            None => {
                self.globals.borrow_mut().assign(&assign.name, value.clone())?;
            },
        };

        // Assignment is an expression; it evaluates to the assigned value.
        Ok(value)
    }

    fn visit_call_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Call(call) = expr else { unreachable!() };

        let callee = self.evaluate(&call.callee)?;

        let mut arguments = Vec::new();
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let callable: &dyn Callable = match &callee {
            Object::Function(function) => function.as_ref(),
            Object::NativeFunction(function) => function,
            Object::Class(class) => class,
            _ => return Err(Unwind::Error(RuntimeError {
                token: call.paren.clone(),
                message: "Can only call functions and classes.".to_string(),
            })),
        };

        if arguments.len() != callable.arity() {
            return Err(Unwind::Error(RuntimeError {
                token: call.paren.clone(),
                message: format!(
                    "Expected {} arguments but got {}.",
                    callable.arity(),
                    arguments.len()
                ),
            }));
        }

        callable.call(self, arguments)
    }

    fn visit_get_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Get(get) = expr else { unreachable!() };

        let object = self.evaluate(&get.object)?;

        match &object {
            Object::Instance(instance) => {
                instance.borrow().get(&get.name, &object).map_err(Unwind::from)
            },
            _ => Err(Unwind::Error(RuntimeError {
                token: get.name.clone(),
                message: "Only instances have properties.".to_string(),
            })),
        }
    }

    fn visit_set_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Set(set) = expr else { unreachable!() };

        let object = self.evaluate(&set.object)?;

        match object {
            Object::Instance(instance) => {
                let value = self.evaluate(&set.value)?;
                instance.borrow_mut().set(&set.name, value.clone());
                Ok(value)
            },
            _ => Err(Unwind::Error(RuntimeError {
                token: set.name.clone(),
                message: "Only instance have fields".to_string(),
            })),
        }
    }

    fn visit_this_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::This(this) = expr else { unreachable!() };

        self.look_up_variable(&this.keyword)
    }

    fn visit_super_expr(&mut self, expr: &Expr) -> EvalResult {
        let Expr::Super(super_expr) = expr else { unreachable!() };

        // The resolver recorded the distance to the scope defining `super`;
        // the bound instance lives one scope nearer.
        let Some(distance) = self.locals.get(&super_expr.keyword).copied() else { unreachable!() };

        let superclass = self.environment.borrow().get_at(distance, &super_expr.keyword)?;
        let Object::Class(superclass) = superclass else { unreachable!() };

        let instance = self.environment.borrow().get_at(distance - 1, &Token::from("this"))?;

        let Some(method) = superclass.borrow().find_method(&super_expr.method.lexeme) else {
            return Err(Unwind::Error(RuntimeError {
                token: super_expr.method.clone(),
                message: format!("Undefined property '{}'.", super_expr.method.lexeme),
            }));
        };

        Ok(Object::from(method.bind(instance)))
    }
}

impl<'a> StmtVisitor<ExecResult> for Interpreter<'a> {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Expression(data) = stmt else { unreachable!() };

        self.evaluate(&data.expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Print(data) = stmt else { unreachable!() };

        let value = self.evaluate(&data.expr)?;
        writeln!(self.output, "{value}").expect("output stream to be writable");

        Ok(())
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Var(data) = stmt else { unreachable!() };

        let value = match &data.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::from(Literal::Nil),
        };

        self.environment.borrow_mut().define(&data.name.lexeme, value);
        Ok(())
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Block(data) = stmt else { unreachable!() };

        let environment = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&data.statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::If(data) = stmt else { unreachable!() };

        if self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.then_branch)
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::While(data) = stmt else { unreachable!() };

        while self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.body)?;
        }

        Ok(())
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Function(data) = stmt else { unreachable!() };

        let function = Function::new(data, Rc::clone(&self.environment), false);
        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));

        Ok(())
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Return(data) = stmt else { unreachable!() };

        let value = match &data.value {
            Some(value) => self.evaluate(value)?,
            None => Object::from(Literal::Nil),
        };

        Err(Unwind::Return(value))
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        let Stmt::Class(data) = stmt else { unreachable!() };

        let superclass = match &data.superclass {
            Some(expr) => match self.evaluate(expr)? {
                Object::Class(superclass) => Some(superclass),
                _ => {
                    let Expr::Variable(variable) = expr else { unreachable!() };

                    return Err(Unwind::Error(RuntimeError {
                        token: variable.name.clone(),
                        message: "Superclass must be a class".to_string(),
                    }));
                },
            },
            None => None,
        };

        // Two-step definition so the methods can close over the class name.
        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(Literal::Nil));

        // Methods of a subclass close over an extra scope defining `super`.
        let enclosing = superclass.as_ref().map(|superclass| {
            let mut environment = Environment::new(Some(Rc::clone(&self.environment)));
            environment.define("super", Object::from(Rc::clone(superclass)));
            mem::replace(&mut self.environment, Rc::new(RefCell::new(environment)))
        });

        let mut methods = HashMap::new();
        for method in &data.methods {
            let Stmt::Function(function) = method else { unreachable!() };

            let is_initializer = function.name.lexeme == "init";
            methods.insert(
                function.name.lexeme.clone(),
                Function::new(function, Rc::clone(&self.environment), is_initializer),
            );
        }

        let class = Class::new(data.name.lexeme.clone(), superclass, methods);

        if let Some(previous) = enclosing {
            self.environment = previous;
        }

        self.environment.borrow_mut().assign(&data.name, Object::from(class))?;

        Ok(())
    }
}
