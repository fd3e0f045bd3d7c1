use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Derive macro that generates a keyframe track set for a struct of animatable values.
///
/// For a struct `Values`, this generates `ValuesTracks` with one
/// `KeyframeTrack<FieldType>` per field, each starting at the field's value in
/// the struct passed to `ValuesTracks::new`. The generated type implements
/// `TrackSet`, sampling every field at the same elapsed time, and `Values`
/// implements `Keyframes` so it can hand out a fresh track set.
///
/// Every field type must implement `tapback::animation::Animatable`.
///
/// # Example
/// ```ignore
/// #[derive(Clone, Copy, Debug, PartialEq, Keyframes)]
/// struct Values {
///     opacity: f32,
///     angle: Angle,
/// }
///
/// let mut tracks = Values { opacity: 0.0, angle: Angle::ZERO }.tracks();
/// tracks.opacity = tracks.opacity.linear(1.0, 0.3);
/// let halfway = tracks.sample(0.15);
/// ```
#[proc_macro_derive(Keyframes)]
pub fn derive_keyframes(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let struct_name = &input.ident;
    let vis = &input.vis;
    let tracks_name = format_ident!("{}Tracks", struct_name);

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    struct_name,
                    "Keyframes can only be derived for structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(struct_name, "Keyframes can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    let names: Vec<_> = fields.iter().filter_map(|f| f.ident.clone()).collect();
    let types: Vec<_> = fields.iter().map(|f| f.ty.clone()).collect();

    let track_fields = names.iter().zip(types.iter()).map(|(name, ty)| {
        quote! {
            pub #name: ::tapback::animation::KeyframeTrack<#ty>
        }
    });

    let track_inits = names.iter().map(|name| {
        quote! {
            #name: ::tapback::animation::KeyframeTrack::new(initial.#name)
        }
    });

    let samples = names.iter().map(|name| {
        quote! {
            #name: self.#name.sample(elapsed)
        }
    });

    let durations = names.iter().map(|name| {
        quote! {
            duration = duration.max(self.#name.duration());
        }
    });

    let inherits = names.iter().map(|name| {
        quote! {
            self.#name.inherit_velocity(&previous.#name, elapsed);
        }
    });

    let expanded = quote! {
        /// One keyframe track per field, sampled in lockstep.
        #[derive(Clone, Debug)]
        #vis struct #tracks_name {
            #(#track_fields,)*
        }

        impl #tracks_name {
            /// Empty tracks resting at the fields of `initial`.
            #vis fn new(initial: &#struct_name) -> Self {
                Self {
                    #(#track_inits,)*
                }
            }
        }

        impl ::tapback::animation::TrackSet for #tracks_name {
            type Values = #struct_name;

            fn sample(&self, elapsed: f32) -> #struct_name {
                #struct_name {
                    #(#samples,)*
                }
            }

            fn duration(&self) -> f32 {
                let mut duration = 0.0f32;
                #(#durations)*
                duration
            }

            fn inherit_velocity(&mut self, previous: &Self, elapsed: f32) {
                #(#inherits)*
            }
        }

        impl ::tapback::animation::Keyframes for #struct_name {
            type Tracks = #tracks_name;

            fn tracks(&self) -> #tracks_name {
                #tracks_name::new(self)
            }
        }
    };

    TokenStream::from(expanded)
}
