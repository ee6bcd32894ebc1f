//! Card sheet document writer
//!
//! Draws the front page stream and the back page stream of a layout plan
//! into one PDF:
//! 1. Render every front page, then every back page, in page order
//! 2. Combine the two streams according to the page order option
//! 3. Attach them to a single page tree

use crate::constants::mm_to_pt;
use crate::images::ImageStore;
use crate::marks::{CardRect, generate_crop_marks};
use crate::types::*;
use card_layout::layout::pages;
use card_layout::{ImageCatalog, LayoutOptions, LayoutPlan, PageOrder, Slot, SlotGrid};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::path::Path;

/// One image drawn into one slot
struct CardDraw<'a> {
    slot_index: usize,
    image: &'a Path,
}

/// Fixed per-run page parameters
struct PageSetup<'a> {
    grid: &'a SlotGrid,
    width_pt: f32,
    height_pt: f32,
    parent_pages_id: ObjectId,
    cut_marks: bool,
}

/// Write a layout plan to a PDF file.
pub async fn write_pdf(
    plan: &LayoutPlan,
    catalog: &ImageCatalog,
    options: &LayoutOptions,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let plan = plan.clone();
    let catalog = catalog.clone();
    let options = options.clone();
    let output_path = output_path.as_ref().to_owned();

    // Image decoding and PDF assembly are CPU-bound
    let bytes = tokio::task::spawn_blocking(move || {
        let mut doc = render_document(&plan, &catalog, &options)?;
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, RenderError>(writer)
    })
    .await??;

    tokio::fs::write(&output_path, bytes).await?;
    log::info!("Wrote card sheets to {}", output_path.display());

    Ok(())
}

/// Render a layout plan into an in-memory PDF document.
///
/// Front images come from `catalog` by card id; back images come from the
/// plan's back placements. Page size and slots both come from the plan's
/// grid; `options` only chooses page order, mirroring and marks.
pub fn render_document(
    plan: &LayoutPlan,
    catalog: &ImageCatalog,
    options: &LayoutOptions,
) -> Result<Document> {
    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut images = ImageStore::new();

    let setup = PageSetup {
        grid: &plan.grid,
        width_pt: mm_to_pt(plan.grid.page_width_mm),
        height_pt: mm_to_pt(plan.grid.page_height_mm),
        parent_pages_id: pages_tree_id,
        cut_marks: options.cut_marks,
    };

    let mut front_pages = Vec::new();
    for page in pages(&plan.fronts) {
        let draws = page
            .iter()
            .map(|placement| {
                let image = catalog
                    .get(&placement.card.id)
                    .ok_or_else(|| RenderError::MissingImage(placement.card.id.clone()))?;
                Ok(CardDraw {
                    slot_index: placement.slot_index,
                    image,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        front_pages.push(render_page(&mut output, &mut images, &setup, &draws, false)?);
    }

    let mut back_pages = Vec::new();
    for page in pages(&plan.backs) {
        let draws: Vec<_> = page
            .iter()
            .map(|placement| CardDraw {
                slot_index: placement.slot_index,
                image: &placement.image,
            })
            .collect();
        back_pages.push(render_page(
            &mut output,
            &mut images,
            &setup,
            &draws,
            options.mirror_backs,
        )?);
    }

    log::debug!(
        "Rendered {} front and {} back pages using {} images",
        front_pages.len(),
        back_pages.len(),
        images.len()
    );

    let page_refs: Vec<Object> = order_pages(front_pages, back_pages, options.page_order)
        .into_iter()
        .map(Object::Reference)
        .collect();

    // Create pages tree
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    // Create catalog
    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);

    Ok(output)
}

/// Combine the front and back page streams
fn order_pages(fronts: Vec<ObjectId>, backs: Vec<ObjectId>, order: PageOrder) -> Vec<ObjectId> {
    match order {
        PageOrder::Sequential => fronts.into_iter().chain(backs).collect(),
        PageOrder::Interleaved => {
            let mut ordered = Vec::with_capacity(fronts.len() + backs.len());
            let mut backs = backs.into_iter();
            for front in fronts {
                ordered.push(front);
                ordered.extend(backs.next());
            }
            ordered.extend(backs);
            ordered
        }
    }
}

/// Slot a card is drawn in, optionally mirrored across the page
fn draw_slot(grid: &SlotGrid, slot_index: usize, mirror: bool) -> Option<Slot> {
    if mirror {
        grid.mirrored_slot(slot_index)
    } else {
        grid.slot(slot_index).copied()
    }
}

/// Render one page of cards to the output document
fn render_page(
    output: &mut Document,
    images: &mut ImageStore,
    setup: &PageSetup<'_>,
    draws: &[CardDraw<'_>],
    mirror: bool,
) -> Result<ObjectId> {
    let grid = setup.grid;

    // Create page dictionary
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(setup.parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(setup.width_pt),
            Object::Real(setup.height_pt),
        ]),
    );

    let mut card_ops = Vec::new();
    let mut card_rects = Vec::new();
    let mut xobjects = Dictionary::new();

    for draw in draws {
        let slot = draw_slot(grid, draw.slot_index, mirror)
            .ok_or(RenderError::SlotOutOfRange(draw.slot_index))?;

        let xobject_id = images.embed(output, draw.image)?;
        let xobject_name = format!("Im{}", xobject_id.0);
        xobjects.set(xobject_name.as_bytes(), Object::Reference(xobject_id));

        let rect = CardRect {
            x: mm_to_pt(slot.x_mm),
            y: mm_to_pt(slot.y_mm),
            width: mm_to_pt(grid.card_width_mm),
            height: mm_to_pt(grid.card_height_mm),
        };
        // Image space is the unit square; scale it up to the card
        card_ops.push(format!(
            "q {} 0 0 {} {} {} cm /{} Do Q\n",
            rect.width, rect.height, rect.x, rect.y, xobject_name
        ));
        card_rects.push(rect);
    }

    // Marks go first so a neighbouring card paints over any overlap
    let mut content = String::new();
    if setup.cut_marks {
        content.push_str(&generate_crop_marks(&card_rects));
    }
    content.push_str(&card_ops.concat());

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}
