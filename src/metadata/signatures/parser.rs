use crate::{
    file::parser::Parser,
    metadata::signatures::{
        ArrayDimensions, CustomModifier, SignatureArray, SignatureMethod, SignatureProperty,
        TypeSignature, ELEMENT_TYPE,
    },
    Error::RecursionLimit,
    Result,
};

/// Maximum nesting of types within a single signature.
const MAX_RECURSION_DEPTH: usize = 50;

/// Highest array rank the runtime accepts.
const MAX_ARRAY_RANK: u32 = 32;

/// Decoder for signature blobs from the `#Blob` heap.
///
/// # Examples
///
/// ```rust,ignore
/// use harmonygen::metadata::signatures::{SignatureParser, TypeSignature};
///
/// // instance void (int32, string)
/// let blob = [0x20, 0x02, 0x01, 0x08, 0x0E];
/// let method = SignatureParser::new(&blob).parse_method_signature()?;
/// assert!(method.has_this);
/// assert_eq!(method.params, vec![TypeSignature::I4, TypeSignature::String]);
/// # Ok::<(), harmonygen::Error>(())
/// ```
pub struct SignatureParser<'a> {
    parser: Parser<'a>,
    depth: usize,
}

impl<'a> SignatureParser<'a> {
    /// Create a new parser over a signature blob.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        SignatureParser {
            parser: Parser::new(data),
            depth: 0,
        }
    }

    fn parse_type(&mut self) -> Result<TypeSignature> {
        self.depth += 1;
        if self.depth >= MAX_RECURSION_DEPTH {
            return Err(RecursionLimit(MAX_RECURSION_DEPTH));
        }

        let result = self.parse_type_inner();
        self.depth -= 1;
        result
    }

    fn parse_type_inner(&mut self) -> Result<TypeSignature> {
        let current_byte = self.parser.read_le::<u8>()?;
        match current_byte {
            ELEMENT_TYPE::VOID => Ok(TypeSignature::Void),
            ELEMENT_TYPE::BOOLEAN => Ok(TypeSignature::Boolean),
            ELEMENT_TYPE::CHAR => Ok(TypeSignature::Char),
            ELEMENT_TYPE::I1 => Ok(TypeSignature::I1),
            ELEMENT_TYPE::U1 => Ok(TypeSignature::U1),
            ELEMENT_TYPE::I2 => Ok(TypeSignature::I2),
            ELEMENT_TYPE::U2 => Ok(TypeSignature::U2),
            ELEMENT_TYPE::I4 => Ok(TypeSignature::I4),
            ELEMENT_TYPE::U4 => Ok(TypeSignature::U4),
            ELEMENT_TYPE::I8 => Ok(TypeSignature::I8),
            ELEMENT_TYPE::U8 => Ok(TypeSignature::U8),
            ELEMENT_TYPE::R4 => Ok(TypeSignature::R4),
            ELEMENT_TYPE::R8 => Ok(TypeSignature::R8),
            ELEMENT_TYPE::STRING => Ok(TypeSignature::String),
            ELEMENT_TYPE::PTR => Ok(TypeSignature::Ptr(Box::new(self.parse_type()?))),
            ELEMENT_TYPE::BYREF => Ok(TypeSignature::ByRef(Box::new(self.parse_type()?))),
            ELEMENT_TYPE::VALUETYPE => Ok(TypeSignature::ValueType(
                self.parser.read_compressed_token()?,
            )),
            ELEMENT_TYPE::CLASS => Ok(TypeSignature::Class(self.parser.read_compressed_token()?)),
            ELEMENT_TYPE::VAR => Ok(TypeSignature::GenericParamType(
                self.parser.read_compressed_uint()?,
            )),
            ELEMENT_TYPE::ARRAY => {
                let elem_type = self.parse_type()?;
                let rank = self.parser.read_compressed_uint()?;
                if rank == 0 || rank > MAX_ARRAY_RANK {
                    return Err(malformed_error!("ARRAY - invalid rank {}", rank));
                }

                let num_sizes = self.parser.read_compressed_uint()?;
                if num_sizes > rank {
                    return Err(malformed_error!(
                        "ARRAY - {} sizes for rank {}",
                        num_sizes,
                        rank
                    ));
                }
                let mut sizes = Vec::with_capacity(num_sizes as usize);
                for _ in 0..num_sizes {
                    sizes.push(self.parser.read_compressed_uint()?);
                }

                let num_lo_bounds = self.parser.read_compressed_uint()?;
                if num_lo_bounds > rank {
                    return Err(malformed_error!(
                        "ARRAY - {} lower bounds for rank {}",
                        num_lo_bounds,
                        rank
                    ));
                }
                let mut lower_bounds = Vec::with_capacity(num_lo_bounds as usize);
                for _ in 0..num_lo_bounds {
                    lower_bounds.push(self.parser.read_compressed_int()?);
                }

                let dimensions = (0..rank as usize)
                    .map(|index| ArrayDimensions {
                        size: sizes.get(index).copied(),
                        lower_bound: lower_bounds.get(index).copied(),
                    })
                    .collect();

                Ok(TypeSignature::Array(SignatureArray {
                    base: Box::new(elem_type),
                    rank,
                    dimensions,
                }))
            }
            ELEMENT_TYPE::GENERICINST => {
                let peek_byte = self.parser.peek_byte()?;
                if peek_byte != ELEMENT_TYPE::CLASS && peek_byte != ELEMENT_TYPE::VALUETYPE {
                    return Err(malformed_error!(
                        "GENERICINST - Next byte is not TYPE_CLASS or TYPE_VALUE - {}",
                        peek_byte
                    ));
                }

                let base_type = self.parse_type()?;
                let arg_count = self.parser.read_compressed_uint()?;

                let mut type_args = Vec::new();
                for _ in 0..arg_count {
                    type_args.push(self.parse_type()?);
                }

                Ok(TypeSignature::GenericInst(Box::new(base_type), type_args))
            }
            ELEMENT_TYPE::TYPEDBYREF => Ok(TypeSignature::TypedByRef),
            ELEMENT_TYPE::I => Ok(TypeSignature::I),
            ELEMENT_TYPE::U => Ok(TypeSignature::U),
            ELEMENT_TYPE::FNPTR => Ok(TypeSignature::FnPtr(Box::new(
                self.parse_method_signature()?,
            ))),
            ELEMENT_TYPE::OBJECT => Ok(TypeSignature::Object),
            ELEMENT_TYPE::SZARRAY => Ok(TypeSignature::SzArray(Box::new(self.parse_type()?))),
            ELEMENT_TYPE::MVAR => Ok(TypeSignature::GenericParamMethod(
                self.parser.read_compressed_uint()?,
            )),
            ELEMENT_TYPE::CMOD_REQD | ELEMENT_TYPE::CMOD_OPT => {
                let modifier = CustomModifier {
                    is_required: current_byte == ELEMENT_TYPE::CMOD_REQD,
                    modifier_type: self.parser.read_compressed_token()?,
                };

                Ok(TypeSignature::Modified(
                    modifier,
                    Box::new(self.parse_type()?),
                ))
            }
            ELEMENT_TYPE::SENTINEL => Ok(TypeSignature::Sentinel),
            ELEMENT_TYPE::PINNED => Ok(TypeSignature::Pinned(Box::new(self.parse_type()?))),
            _ => Err(malformed_error!(
                "Unsupported ELEMENT_TYPE - {}",
                current_byte
            )),
        }
    }

    /// Parse a method signature (`MethodDefSig`, `MethodRefSig` or `FNPTR` target).
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for unknown element types,
    /// [`crate::Error::OutOfBounds`] for truncated blobs and [`crate::Error::RecursionLimit`]
    /// for pathological nesting.
    pub fn parse_method_signature(&mut self) -> Result<SignatureMethod> {
        let convention_byte = self.parser.read_le::<u8>()?;

        let mut method = SignatureMethod {
            has_this: convention_byte & 0x20 != 0,
            explicit_this: convention_byte & 0x40 != 0,
            vararg: convention_byte & 0x0F == 0x05,
            param_count_generic: if convention_byte & 0x10 != 0 {
                self.parser.read_compressed_uint()?
            } else {
                0
            },
            ..SignatureMethod::default()
        };

        let param_count = self.parser.read_compressed_uint()?;
        method.return_type = Some(self.parse_type()?);

        let mut after_sentinel = false;
        for _ in 0..param_count {
            if self.parser.peek_byte()? == ELEMENT_TYPE::SENTINEL {
                self.parser.advance()?;
                after_sentinel = true;
            }

            let param = self.parse_type()?;
            if after_sentinel {
                method.varargs.push(param);
            } else {
                method.params.push(param);
            }
        }

        Ok(method)
    }

    /// Parse a property signature.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the blob does not start with the `PROPERTY`
    /// marker, or any error of [`SignatureParser::parse_method_signature`].
    pub fn parse_property_signature(&mut self) -> Result<SignatureProperty> {
        let head_byte = self.parser.read_le::<u8>()?;
        if (head_byte & 0x08) == 0 {
            return Err(malformed_error!(
                "SignatureProperty - invalid start - {}",
                head_byte
            ));
        }

        let has_this = (head_byte & 0x20) != 0;
        let param_count = self.parser.read_compressed_uint()?;
        let base = self.parse_type()?;

        let mut params = Vec::new();
        for _ in 0..param_count {
            params.push(self.parse_type()?);
        }

        Ok(SignatureProperty {
            has_this,
            base,
            params,
        })
    }

    /// Parse a `TypeSpec` blob, which is a single type.
    ///
    /// # Errors
    /// Same as [`SignatureParser::parse_method_signature`].
    pub fn parse_type_spec_signature(&mut self) -> Result<TypeSignature> {
        self.parse_type()
    }
}
