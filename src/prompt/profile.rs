//! Per-domain prompt profiles.
//!
//! One table holds everything that varies by domain: the customization
//! schema, the image/video angle templates, the ideas brief and the video
//! style hint. Templates use `{dominant}`, `{accent}`, `{palette}`,
//! `{context}` and `{ideas}` placeholders (see [`super::template`]).

use crate::types::{CustomizationSchema, Domain, FieldSpec};

/// Image and video templates for one angle.
#[derive(Debug, Clone, Copy)]
pub struct AngleTemplate {
    pub name: &'static str,
    pub image: &'static str,
    pub video: &'static str,
}

/// Everything domain-specific the prompt builder needs.
#[derive(Debug)]
pub struct DomainProfile {
    pub domain: Domain,
    pub schema: CustomizationSchema,
    pub angles: &'static [AngleTemplate],
    /// What the text backend is asked to write.
    pub ideas_brief: &'static str,
    /// Style hint passed to video backends.
    pub video_style: &'static str,
    /// Noun phrase used by series prompts, e.g. "a plated dish".
    pub subject: &'static str,
}

impl DomainProfile {
    /// Find an angle by name, ignoring case and surrounding whitespace.
    pub fn angle(&self, name: &str) -> Option<&'static AngleTemplate> {
        let name = name.trim();
        self.angles.iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }

    pub fn angle_names(&self) -> Vec<&'static str> {
        self.angles.iter().map(|a| a.name).collect()
    }
}

/// Look up the profile for a domain.
pub fn profile(domain: Domain) -> &'static DomainProfile {
    match domain {
        Domain::Cooking => &COOKING,
        Domain::Fashion => &FASHION,
        Domain::Interior => &INTERIOR,
        Domain::Art => &ART,
    }
}

static COOKING: DomainProfile = DomainProfile {
    domain: Domain::Cooking,
    schema: CustomizationSchema {
        fields: &[
            FieldSpec::one("cuisine"),
            FieldSpec::one("course"),
            FieldSpec::many("dietary"),
            FieldSpec::one("occasion"),
        ],
        sentinels: &["Chef's choice", "Any"],
    },
    angles: &[
        AngleTemplate {
            name: "Dish Plated",
            image: "A beautifully plated dish photographed at a 45-degree angle in soft natural light. \
                    The food is built around {dominant} as the dominant colour with {accent} as the accent, \
                    drawing on the palette {palette}.{context}{ideas}",
            video: "A slow cinematic push-in on a dish being plated, each component placed by hand. \
                    {dominant} dominates the plate and {accent} provides the finishing touch, \
                    drawing on the palette {palette}.{context}{ideas}",
        },
        AngleTemplate {
            name: "Ingredients Flat Lay",
            image: "An overhead flat lay of raw ingredients arranged on a textured surface, grouped by colour. \
                    {dominant} ingredients take up most of the frame and {accent} ingredients punctuate it, \
                    following the palette {palette}.{context}{ideas}",
            video: "An overhead stop-motion sequence of ingredients sliding into a flat lay arrangement. \
                    {dominant} leads and {accent} appears last, following the palette {palette}.{context}{ideas}",
        },
        AngleTemplate {
            name: "Table Setting",
            image: "A styled dinner table with the finished meal, linens and tableware. \
                    {dominant} sets the mood of the table and {accent} shows up in small details, \
                    using the palette {palette}.{context}{ideas}",
            video: "A gentle tracking shot along a set dinner table as candles are lit. \
                    {dominant} sets the mood and {accent} catches the light, \
                    using the palette {palette}.{context}{ideas}",
        },
    ],
    ideas_brief: "Write a recipe concept: a dish name, a short description, the key ingredients \
                  mapped to palette colours, and brief plating notes.",
    video_style: "warm food cinematography, shallow depth of field",
    subject: "a plated dish",
};

static FASHION: DomainProfile = DomainProfile {
    domain: Domain::Fashion,
    schema: CustomizationSchema {
        fields: &[
            FieldSpec::one("style"),
            FieldSpec::one("season"),
            FieldSpec::one("occasion"),
            FieldSpec::many("garments"),
        ],
        sentinels: &["Any", "Designer's choice"],
    },
    angles: &[
        AngleTemplate {
            name: "Full Outfit",
            image: "A full-length editorial fashion photograph of a model in a complete outfit. \
                    The look is anchored by {dominant} with {accent} accessories, \
                    styled from the palette {palette}.{context}",
            video: "A model walks toward the camera in a complete outfit, fabric moving with each step. \
                    The look is anchored by {dominant} with {accent} accessories, \
                    styled from the palette {palette}.{context}",
        },
        AngleTemplate {
            name: "Flat Lay",
            image: "A clean flat lay of garments and accessories on a neutral backdrop. \
                    {dominant} pieces form the base and {accent} pieces add contrast, \
                    from the palette {palette}.{context}",
            video: "Garments and accessories drop one by one into a flat lay arrangement. \
                    {dominant} pieces form the base and {accent} pieces add contrast, \
                    from the palette {palette}.{context}",
        },
        AngleTemplate {
            name: "Runway Look",
            image: "A runway photograph under dramatic lighting, capturing a statement look. \
                    {dominant} defines the silhouette and {accent} appears in the details, \
                    inspired by the palette {palette}.{context}{ideas}",
            video: "A runway sequence under dramatic lighting, following a statement look down the catwalk. \
                    {dominant} defines the silhouette and {accent} flashes in the details, \
                    inspired by the palette {palette}.{context}{ideas}",
        },
    ],
    ideas_brief: "Write an outfit concept: a name for the look, the key garments and accessories \
                  mapped to palette colours, fabrics, and styling notes.",
    video_style: "editorial fashion film, smooth gimbal movement",
    subject: "a styled outfit",
};

static INTERIOR: DomainProfile = DomainProfile {
    domain: Domain::Interior,
    schema: CustomizationSchema {
        fields: &[
            FieldSpec::one("room"),
            FieldSpec::one("style"),
            FieldSpec::one("mood"),
            FieldSpec::many("materials"),
        ],
        sentinels: &["Any", "Designer's choice"],
    },
    angles: &[
        AngleTemplate {
            name: "Room Overview",
            image: "A wide architectural photograph of a furnished room in natural daylight. \
                    {dominant} covers the large surfaces and {accent} appears in decor and textiles, \
                    following the palette {palette}.{context}{ideas}",
            video: "A slow walkthrough of a furnished room as daylight shifts across it. \
                    {dominant} covers the large surfaces and {accent} appears in decor and textiles, \
                    following the palette {palette}.{context}{ideas}",
        },
        AngleTemplate {
            name: "Detail Vignette",
            image: "A close vignette of a styled shelf or side table with objects, plants and books. \
                    {dominant} frames the scene and {accent} draws the eye, \
                    using the palette {palette}.{context}",
            video: "A macro dolly shot across a styled shelf of objects, plants and books. \
                    {dominant} frames the scene and {accent} draws the eye, \
                    using the palette {palette}.{context}",
        },
        AngleTemplate {
            name: "Mood Board",
            image: "A designer's mood board with fabric swatches, paint chips and material samples. \
                    {dominant} leads the board and {accent} ties it together, \
                    built from the palette {palette}.{context}{ideas}",
            video: "Swatches, paint chips and samples are pinned one after another onto a mood board. \
                    {dominant} leads the board and {accent} ties it together, \
                    built from the palette {palette}.{context}{ideas}",
        },
    ],
    ideas_brief: "Write an interior design concept: the room, wall and floor treatments, furniture \
                  and decor mapped to palette colours, and the intended atmosphere.",
    video_style: "architectural walkthrough, steady slow camera",
    subject: "a furnished room",
};

static ART: DomainProfile = DomainProfile {
    domain: Domain::Art,
    schema: CustomizationSchema {
        fields: &[
            FieldSpec::one("medium"),
            FieldSpec::one("style"),
            FieldSpec::one("subject"),
            FieldSpec::many("techniques"),
        ],
        sentinels: &["Any", "Artist's choice"],
    },
    angles: &[
        AngleTemplate {
            name: "Finished Artwork",
            image: "A finished artwork shown straight on, filling the frame. \
                    {dominant} carries the composition and {accent} marks the focal point, \
                    painted from the palette {palette}.{context}{ideas}",
            video: "A finished artwork revealed by a slow pull-back from a single brushstroke. \
                    {dominant} carries the composition and {accent} marks the focal point, \
                    painted from the palette {palette}.{context}{ideas}",
        },
        AngleTemplate {
            name: "Studio Scene",
            image: "An artist's studio with a work in progress on the easel and paints laid out. \
                    {dominant} fills the canvas and {accent} is being added, \
                    mixed from the palette {palette}.{context}",
            video: "A timelapse in an artist's studio as a painting comes together on the easel. \
                    {dominant} fills the canvas and {accent} is added last, \
                    mixed from the palette {palette}.{context}",
        },
        AngleTemplate {
            name: "Abstract Study",
            image: "An abstract colour-field study of overlapping shapes and gradients. \
                    {dominant} sets the field and {accent} cuts through it, \
                    limited to the palette {palette}.{context}{ideas}",
            video: "Abstract shapes and gradients drift, overlap and bloom. \
                    {dominant} sets the field and {accent} cuts through it, \
                    limited to the palette {palette}.{context}{ideas}",
        },
    ],
    ideas_brief: "Write an artwork concept: a title, the subject and composition, the medium and \
                  techniques, and how each palette colour is used.",
    video_style: "fine-art motion piece, painterly transitions",
    subject: "an artwork",
};
