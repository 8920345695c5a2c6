//! Opaque user extension types.
//!
//! The cell knows nothing about a user type beyond the hooks of
//! [`UserType`]: equality, ordering, truthiness and rendering are forwarded
//! to it unconditionally, and the hooks are assumed total and free of side
//! effects. Implement the trait by hand or with `#[derive(UserType)]`.

use std::any::Any;
use std::fmt;
use std::ops::{Deref, DerefMut};

pub trait UserType: 'static {
    fn type_name(&self) -> &'static str;

    /// Equality with another user value, usually of the same concrete type.
    /// Defaults to identity.
    fn user_eq(&self, other: &dyn UserType) -> bool {
        std::ptr::addr_eq(self, other)
    }

    /// Strict less-than. Defaults to "never less".
    fn user_lt(&self, _other: &dyn UserType) -> bool {
        false
    }

    fn user_truthy(&self) -> bool {
        true
    }

    fn user_fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.type_name())
    }

    /// Copy semantics of the user type
    fn clone_boxed(&self) -> Box<dyn UserType>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Owning wrapper stored in the `User` arm of a value
pub struct UserValue(Box<dyn UserType>);

impl UserValue {
    pub fn new<T: UserType>(data: T) -> Self {
        UserValue(Box::new(data))
    }

    pub fn from_boxed(data: Box<dyn UserType>) -> Self {
        UserValue(data)
    }

    pub fn downcast_ref<T: UserType>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: UserType>(&mut self) -> Option<&mut T> {
        self.0.as_any_mut().downcast_mut::<T>()
    }

    pub fn is<T: UserType>(&self) -> bool {
        self.0.as_any().is::<T>()
    }

    pub fn into_inner(self) -> Box<dyn UserType> {
        self.0
    }
}

impl Deref for UserValue {
    type Target = dyn UserType;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl DerefMut for UserValue {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.0
    }
}

impl Clone for UserValue {
    fn clone(&self) -> Self {
        UserValue(self.0.clone_boxed())
    }
}

impl PartialEq for UserValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.user_eq(&*other.0)
    }
}

impl fmt::Display for UserValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.user_fmt(f)
    }
}

impl fmt::Debug for UserValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User({}: {})", self.0.type_name(), self)
    }
}
