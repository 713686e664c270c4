//! String-constant fingerprints.

use sigpatch_model::{ClassId, ConstantPool, Method, MethodId, Program, TypeDesc};

/// A method located by a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub method: MethodId,
    pub class: ClassId,
    pub defining_class: TypeDesc,
}

/// A set of string literals that must all be loadable by one method.
///
/// The fingerprint does not check that its literal set is unique in the
/// binary; the first method in declaration order wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    name: String,
    strings: Vec<String>,
    returns: Option<TypeDesc>,
}

impl Fingerprint {
    pub fn new<I, S>(name: impl Into<String>, strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            strings: strings.into_iter().map(Into::into).collect(),
            returns: None,
        }
    }

    /// Also require the declared return type.
    pub fn returns(mut self, ty: impl Into<TypeDesc>) -> Self {
        self.returns = Some(ty.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    pub fn matches(&self, method: &Method) -> bool {
        if let Some(ret) = &self.returns {
            if &method.ret != ret {
                return false;
            }
        }
        ConstantPool::of_method(method).contains_all(&self.strings)
    }

    /// First matching method in class and method declaration order.
    pub fn find(&self, program: &Program) -> Option<MatchResult> {
        let found = self.find_all(program).next();
        match &found {
            Some(m) => log::debug!("fingerprint {} matched {}", self.name, m.defining_class),
            None => log::debug!("fingerprint {} matched nothing", self.name),
        }
        found
    }

    /// Every matching method, in declaration order.
    pub fn find_all<'p>(&'p self, program: &'p Program) -> impl Iterator<Item = MatchResult> + 'p {
        program
            .methods()
            .filter(|(_, method)| self.matches(method))
            .filter_map(move |(id, _)| {
                let class = program.class(id.class)?;
                Some(MatchResult {
                    method: id,
                    class: id.class,
                    defining_class: class.ty.clone(),
                })
            })
    }
}
