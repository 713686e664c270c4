//! Access flags of classes, fields and methods (Dalvik bit values).

pub const ACC_PUBLIC: u32 = 0x0001;
pub const ACC_PRIVATE: u32 = 0x0002;
pub const ACC_PROTECTED: u32 = 0x0004;
pub const ACC_STATIC: u32 = 0x0008;
pub const ACC_FINAL: u32 = 0x0010;
pub const ACC_SYNCHRONIZED: u32 = 0x0020;
pub const ACC_NATIVE: u32 = 0x0100;
pub const ACC_INTERFACE: u32 = 0x0200;
pub const ACC_ABSTRACT: u32 = 0x0400;
pub const ACC_SYNTHETIC: u32 = 0x1000;
/// Set on `<init>` and `<clinit>`.
pub const ACC_CONSTRUCTOR: u32 = 0x1_0000;

/// Short names of the flags set in `flags`, for listings.
pub fn describe(flags: u32) -> Vec<&'static str> {
    [
        (ACC_PUBLIC, "public"),
        (ACC_PRIVATE, "private"),
        (ACC_PROTECTED, "protected"),
        (ACC_STATIC, "static"),
        (ACC_FINAL, "final"),
        (ACC_SYNCHRONIZED, "synchronized"),
        (ACC_NATIVE, "native"),
        (ACC_INTERFACE, "interface"),
        (ACC_ABSTRACT, "abstract"),
        (ACC_SYNTHETIC, "synthetic"),
        (ACC_CONSTRUCTOR, "constructor"),
    ]
    .into_iter()
    .filter(|(bit, _)| flags & bit != 0)
    .map(|(_, name)| name)
    .collect()
}
