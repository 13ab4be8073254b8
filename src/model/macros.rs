//! Generators for enums, models and params.
//!
//! Field kinds:
//! - `required`: getter returns `Result<T>`, fails when absent or null;
//!   `build()` fails with `MissingField` when it was never set.
//! - `optional`: getter returns `Result<Option<T>>`; setting `None` omits the key.
//!   Setters take `T`, `Option<T>` or, for `String` fields, `&str`.
//! - `nullable`: like `optional`, but setting `None` stores a JSON `null`.

/// Declare a [`WireEnum`](crate::model::WireEnum) with its wire tokens.
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::model::WireEnum for $name {
            const VARIANTS: &'static [Self] = &[ $( Self::$variant ),+ ];

            fn as_wire(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::model::WireEnum::as_wire(self))
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __model_field {
    (@getter [$(#[$m:meta])*] $store:ident required $field:ident : $ty:ty = $key:literal) => {
        $(#[$m])*
        pub fn $field(&self) -> $crate::error::Result<$ty> {
            self.$store.get_required($key)
        }
    };
    (@getter [$(#[$m:meta])*] $store:ident optional $field:ident : $ty:ty = $key:literal) => {
        $(#[$m])*
        pub fn $field(&self) -> $crate::error::Result<::std::option::Option<$ty>> {
            self.$store.get_optional($key)
        }
    };
    (@getter [$(#[$m:meta])*] $store:ident nullable $field:ident : $ty:ty = $key:literal) => {
        $(#[$m])*
        pub fn $field(&self) -> $crate::error::Result<::std::option::Option<$ty>> {
            self.$store.get_optional($key)
        }
    };

    (@setter [$(#[$m:meta])*] $draft:ident required $field:ident : $ty:ty = $key:literal) => {
        $(#[$m])*
        pub fn $field(mut self, value: impl ::std::convert::Into<$ty>) -> Self {
            self.$draft.set_required::<$ty>($key, value.into());
            self
        }
    };
    (@setter [$(#[$m:meta])*] $draft:ident optional $field:ident : $ty:ty = $key:literal) => {
        $(#[$m])*
        pub fn $field(mut self, value: impl $crate::model::IntoOptional<$ty>) -> Self {
            self.$draft.set_optional::<$ty>($key, $crate::model::IntoOptional::into_optional(value));
            self
        }
    };
    (@setter [$(#[$m:meta])*] $draft:ident nullable $field:ident : $ty:ty = $key:literal) => {
        $(#[$m])*
        pub fn $field(mut self, value: impl $crate::model::IntoOptional<$ty>) -> Self {
            self.$draft.set_nullable::<$ty>($key, $crate::model::IntoOptional::into_optional(value));
            self
        }
    };

    (@require $this:tt $draft:ident required $key:literal) => {
        if !$this.$draft.contains_key($key) {
            return ::std::result::Result::Err($crate::error::LexvaultError::MissingField {
                field: ::std::string::String::from($key),
            });
        }
    };
    (@require $this:tt $draft:ident optional $key:literal) => {};
    (@require $this:tt $draft:ident nullable $key:literal) => {};

    (@validate $store:ident required $field:ident : $ty:ty = $key:literal) => {
        $crate::model::Validate::validate(&$store.get_required::<$ty>($key)?)
            .map_err(|err| err.in_field($key))?;
    };
    (@validate $store:ident optional $field:ident : $ty:ty = $key:literal) => {
        if let ::std::option::Option::Some(value) = $store.get_optional::<$ty>($key)? {
            $crate::model::Validate::validate(&value).map_err(|err| err.in_field($key))?;
        }
    };
    (@validate $store:ident nullable $field:ident : $ty:ty = $key:literal) => {
        if let ::std::option::Option::Some(value) = $store.get_optional::<$ty>($key)? {
            $crate::model::Validate::validate(&value).map_err(|err| err.in_field($key))?;
        }
    };
}

/// Declare a response/record model over a [`FrozenStore`](crate::model::FrozenStore)
/// together with its builder.
#[macro_export]
macro_rules! api_model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident => $builder:ident {
            $(
                $(#[$fmeta:meta])*
                $kind:ident $field:ident : $ty:ty = $key:literal;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        $vis struct $name {
            store: $crate::model::FrozenStore,
        }

        impl $name {
            /// Start building a new value with every field absent.
            pub fn builder() -> $builder {
                $builder::default()
            }

            /// Copy this value into a builder; changes to the builder never
            /// reach `self`.
            pub fn to_builder(&self) -> $builder {
                $builder {
                    draft: $crate::model::Draft::from_store(self.store.to_mutable()),
                }
            }

            $(
                $crate::__model_field!(@getter [$(#[$fmeta])*] store $kind $field : $ty = $key);
            )*
        }

        impl $crate::model::Model for $name {
            fn from_store(store: $crate::model::FrozenStore) -> Self {
                Self { store }
            }

            fn store(&self) -> &$crate::model::FrozenStore {
                &self.store
            }
        }

        impl $crate::model::Validate for $name {
            fn validate(&self) -> $crate::error::Result<()> {
                let store = &self.store;
                $(
                    $crate::__model_field!(@validate store $kind $field : $ty = $key);
                )*
                Ok(())
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::__private::serde::Serialize::serialize(&self.store, serializer)
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                <$crate::model::FrozenStore as $crate::__private::serde::Deserialize<'de>>::deserialize(
                    deserializer,
                )
                .map(|store| Self { store })
            }
        }

        #[derive(Debug, Default)]
        $vis struct $builder {
            draft: $crate::model::Draft,
        }

        impl $builder {
            $(
                $crate::__model_field!(@setter [$(#[$fmeta])*] draft $kind $field : $ty = $key);
            )*

            /// Set a key the typed setters do not cover.
            pub fn additional_property(
                mut self,
                key: impl ::std::convert::Into<::std::string::String>,
                value: $crate::__private::serde_json::Value,
            ) -> Self {
                self.draft.set_raw(key, value);
                self
            }

            /// Fails with `MissingField` when a required field was never set.
            pub fn build(self) -> $crate::error::Result<$name> {
                $(
                    $crate::__model_field!(@require self draft $kind $key);
                )*
                self.draft.finish().map(|store| $name { store })
            }
        }
    };
}

/// Declare endpoint params: typed path parameters plus header, query and
/// body fields, each partition frozen into its own store at `build()`.
#[macro_export]
macro_rules! api_params {
    (@segment $this:tt $segment:literal) => {
        ::std::string::String::from($segment)
    };
    (@segment $this:tt $segment:ident) => {
        $this.$segment.clone()
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident => $builder:ident {
            method: $method:ident,
            service: $service:ident,
            path: [ $($segment:tt),* ],
            path_params: ( $($path_param:ident),* ),
            response: $response:ty,
            fields {
                $(
                    $(#[$fmeta:meta])*
                    $place:ident $kind:ident $field:ident : $ty:ty = $key:literal;
                )*
            }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        $vis struct $name {
            $( $path_param: ::std::string::String, )*
            header: $crate::model::FrozenStore,
            query: $crate::model::FrozenStore,
            body: $crate::model::FrozenStore,
        }

        impl $name {
            /// Start building params; path parameters are required up front.
            pub fn builder($( $path_param: impl ::std::convert::Into<::std::string::String> ),*) -> $builder {
                $builder {
                    $( $path_param: $path_param.into(), )*
                    header: ::std::default::Default::default(),
                    query: ::std::default::Default::default(),
                    body: ::std::default::Default::default(),
                }
            }

            $(
                pub fn $path_param(&self) -> &str {
                    &self.$path_param
                }
            )*

            $(
                $crate::__model_field!(@getter [$(#[$fmeta])*] $place $kind $field : $ty = $key);
            )*
        }

        impl $crate::model::Params for $name {
            type Response = $response;

            fn method(&self) -> $crate::__private::reqwest::Method {
                $crate::__private::reqwest::Method::$method
            }

            fn service(&self) -> $crate::api::Service {
                $crate::api::Service::$service
            }

            fn path_segments(&self) -> ::std::vec::Vec<::std::string::String> {
                ::std::vec![ $( $crate::api_params!(@segment self $segment) ),* ]
            }

            fn header_store(&self) -> &$crate::model::FrozenStore {
                &self.header
            }

            fn query_store(&self) -> &$crate::model::FrozenStore {
                &self.query
            }

            fn body_store(&self) -> &$crate::model::FrozenStore {
                &self.body
            }
        }

        #[derive(Debug)]
        $vis struct $builder {
            $( $path_param: ::std::string::String, )*
            header: $crate::model::Draft,
            query: $crate::model::Draft,
            body: $crate::model::Draft,
        }

        impl $builder {
            $(
                $crate::__model_field!(@setter [$(#[$fmeta])*] $place $kind $field : $ty = $key);
            )*

            /// Send an extra header; a JSON `null` removes a default header.
            pub fn additional_header(
                mut self,
                name: impl ::std::convert::Into<::std::string::String>,
                value: $crate::__private::serde_json::Value,
            ) -> Self {
                self.header.set_raw(name, value);
                self
            }

            pub fn additional_query(
                mut self,
                key: impl ::std::convert::Into<::std::string::String>,
                value: $crate::__private::serde_json::Value,
            ) -> Self {
                self.query.set_raw(key, value);
                self
            }

            pub fn additional_body_property(
                mut self,
                key: impl ::std::convert::Into<::std::string::String>,
                value: $crate::__private::serde_json::Value,
            ) -> Self {
                self.body.set_raw(key, value);
                self
            }

            pub fn build(self) -> $crate::error::Result<$name> {
                $(
                    if self.$path_param.is_empty() {
                        return ::std::result::Result::Err($crate::error::LexvaultError::InvalidInput(
                            ::std::format!("path parameter `{}` must not be empty", ::std::stringify!($path_param)),
                        ));
                    }
                )*
                $(
                    $crate::__model_field!(@require self $place $kind $key);
                )*
                ::std::result::Result::Ok($name {
                    $( $path_param: self.$path_param, )*
                    header: self.header.finish()?,
                    query: self.query.finish()?,
                    body: self.body.finish()?,
                })
            }
        }
    };
}
