//! Frame and stack trace data contract.
//!
//! Records coming from a recording expose at most one [`StackTrace`], an
//! ordered sequence of [`Frame`]s (top of stack first) plus a truncation flag.
//! Frame identities (package, type, method) are reference counted so the
//! parser can intern them and the tree can clone frames cheaply.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Name used for the sentinel frame standing in for a truncated stack bottom
pub const UNKNOWN_FRAME_NAME: &str = "<unknown>";

/// A package (namespace) declaring types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Package {
    pub name: String,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The unnamed package has an empty name
    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }
}

/// A type declaring methods
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub package: Rc<Package>,
    pub name: String,
}

impl TypeRef {
    pub fn new(package: Rc<Package>, name: impl Into<String>) -> Self {
        Self {
            package,
            name: name.into(),
        }
    }

    /// Package-qualified type name, e.g. `java.util.HashMap`
    pub fn qualified_name(&self) -> String {
        if self.package.is_default() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package.name, self.name)
        }
    }
}

/// A method identity: declaring type, name and descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method {
    pub declaring_type: Rc<TypeRef>,
    pub name: String,
    pub descriptor: String,
}

impl Method {
    pub fn new(
        declaring_type: Rc<TypeRef>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            declaring_type,
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    pub fn package(&self) -> &Rc<Package> {
        &self.declaring_type.package
    }
}

/// Optimization tier a frame was executing in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FrameType {
    Interpreted,
    JitCompiled,
    Inlined,
    Native,
    #[default]
    Unknown,
}

impl FrameType {
    /// Lenient, case-insensitive parse of recording tier names
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "interpreted" => Self::Interpreted,
            "jit compiled" | "jit_compiled" | "jitcompiled" | "jit" | "compiled" => {
                Self::JitCompiled
            }
            "inlined" => Self::Inlined,
            "native" => Self::Native,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Interpreted => "Interpreted",
            Self::JitCompiled => "JIT compiled",
            Self::Inlined => "Inlined",
            Self::Native => "Native",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// A single stack frame
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    method: Rc<Method>,
    line: Option<u32>,
    bci: Option<u32>,
    frame_type: FrameType,
    unknown: bool,
}

impl Frame {
    pub fn new(method: Rc<Method>, line: Option<u32>, bci: Option<u32>, frame_type: FrameType) -> Self {
        Self {
            method,
            line,
            bci,
            frame_type,
            unknown: false,
        }
    }

    /// The sentinel placed at the missing end of a truncated trace
    ///
    /// It never shares a category with a real frame, even one that happens to
    /// carry the same names.
    pub fn unknown() -> Self {
        let package = Rc::new(Package::new(""));
        let declaring_type = Rc::new(TypeRef::new(package, UNKNOWN_FRAME_NAME));
        Self {
            method: Rc::new(Method::new(declaring_type, UNKNOWN_FRAME_NAME, "")),
            line: None,
            bci: None,
            frame_type: FrameType::Unknown,
            unknown: true,
        }
    }

    pub fn method(&self) -> &Rc<Method> {
        &self.method
    }

    pub fn declaring_type(&self) -> &Rc<TypeRef> {
        &self.method.declaring_type
    }

    pub fn package(&self) -> &Rc<Package> {
        self.method.package()
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn bci(&self) -> Option<u32> {
        self.bci
    }

    pub fn frame_type(&self) -> FrameType {
        self.frame_type
    }

    pub fn is_unknown(&self) -> bool {
        self.unknown
    }
}

/// Ordered frames, top of stack first, plus a truncation flag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StackTrace {
    pub frames: Vec<Frame>,
    pub truncated: bool,
}

impl StackTrace {
    pub fn new(frames: Vec<Frame>, truncated: bool) -> Self {
        Self { frames, truncated }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Anything that may carry a stack trace
///
/// Records without a trace are silently left out of every tree.
pub trait Record {
    fn stack_trace(&self) -> Option<&StackTrace>;
}

impl Record for StackTrace {
    fn stack_trace(&self) -> Option<&StackTrace> {
        Some(self)
    }
}

impl Record for Option<StackTrace> {
    fn stack_trace(&self) -> Option<&StackTrace> {
        self.as_ref()
    }
}

impl<T: Record> Record for Rc<T> {
    fn stack_trace(&self) -> Option<&StackTrace> {
        (**self).stack_trace()
    }
}
