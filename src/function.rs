use std::cell::RefCell;
use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::Unwind;
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{FunctionData, Stmt};
use crate::token::Token;

/// A user-defined function: the declaration's parameters and body together
/// with the environment captured at the point of declaration.
#[derive(Clone)]
pub struct Function {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl Function {
    pub fn new(declaration: &FunctionData, closure: Rc<RefCell<Environment>>, is_initializer: bool) -> Self {
        Function {
            name: declaration.name.clone(),
            params: declaration.params.clone(),
            body: declaration.body.clone(),
            closure,
            is_initializer,
        }
    }

    /// Returns a copy of this function bound to an instance: its closure is a
    /// fresh environment defining `this`, enclosing the original closure.
    pub fn bind(&self, instance: Object) -> Function {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));
        environment.define("this", instance);

        Function {
            name: self.name.clone(),
            params: self.params.clone(),
            body: self.body.clone(),
            closure: Rc::new(RefCell::new(environment)),
            is_initializer: self.is_initializer,
        }
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, Unwind> {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));

        self.params.iter().zip(arguments.iter()).for_each(|(param, argument)| {
            environment.define(&param.lexeme, argument.to_owned());
        });

        match interpreter.execute_block(&self.body, Rc::new(RefCell::new(environment))) {
            Ok(()) => (),
            Err(Unwind::Return(value)) => {
                // An initializer discards the returned value and yields `this`.
                if !self.is_initializer {
                    return Ok(value);
                }
            },
            Err(error) => return Err(error),
        };

        if self.is_initializer {
            return self.closure.borrow().get_at(0, &Token::from("this")).map_err(Unwind::from);
        }

        Ok(Object::from(Literal::Nil))
    }

    fn arity(&self) -> usize {
        self.params.len()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<function {}>", self.name.lexeme)
    }
}

// Manual impl: the captured environment can reach this function again
// through a recursive binding, so the derived walk would not terminate.
impl Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<function {}>", self.name.lexeme)
    }
}

/// A function provided by the host. Natives take no parameters.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: Token,
    pub function: for<'a, 'b> fn(&'a mut Interpreter<'b>, Vec<Object>) -> Result<Object, Unwind>,
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, Unwind> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        0
    }
}

impl NativeFunction {
    /// The native functions pre-bound in the globals environment.
    pub fn get_globals() -> Vec<NativeFunction> {
        fn clock(_: &mut Interpreter, _: Vec<Object>) -> Result<Object, Unwind> {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("system clock to be past the epoch")
                .as_secs_f64();
            Ok(Object::from(now))
        }

        vec![
            NativeFunction {
                name: Token::from("clock"),
                function: clock,
            },
        ]
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native function>")
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native function {}>", self.name.lexeme)
    }
}
