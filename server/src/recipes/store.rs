//! Persistence for the recipe aggregate: a recipe row plus its child
//! collections (ingredients, instructions, nutrition, dietary tags,
//! affiliate links) treated as one consistency unit.
//!
//! Writes run inside a single transaction so a failure anywhere leaves no
//! orphaned child rows. Reads batch-load every child collection for the
//! recipe set in one query each and regroup in memory.

use crate::models::{
    AffiliateLinkInput, AffiliateLinkRow, Difficulty, IngredientInput, IngredientRow,
    InstructionRow, NewAffiliateLink, NewIngredient, NewInstruction, NewNutrition, NewRecipe,
    NutritionInput, NutritionRow, Recipe, RecipeChangeset,
};
use crate::schema::{
    affiliate_links, dietary_tags, ingredients, instructions, nutrition, recipe_dietary_tags,
    recipes,
};
use chrono::Utc;
use diesel::prelude::*;
use std::collections::HashMap;
use uuid::Uuid;

pub struct RecipeAggregate {
    pub recipe: Recipe,
    pub ingredients: Vec<IngredientRow>,
    pub instructions: Vec<InstructionRow>,
    pub dietary_tags: Vec<String>,
    pub nutrition: Option<NutritionRow>,
    pub affiliate_links: Vec<AffiliateLinkRow>,
}

pub struct NewRecipeAggregate<'a> {
    pub user_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: Difficulty,
    pub image_url: &'a str,
    pub is_favorite: bool,
    pub ingredients: &'a [IngredientInput],
    pub instructions: &'a [String],
    pub dietary_tags: &'a [String],
    pub nutrition: &'a NutritionInput,
    pub affiliate_links: &'a [AffiliateLinkInput],
}

/// Partial update. Scalar changes ride in the changeset; `Some` collections
/// fully replace the stored set, `None` collections are left untouched.
pub struct RecipeUpdate<'a> {
    pub changeset: RecipeChangeset<'a>,
    pub ingredients: Option<&'a [IngredientInput]>,
    pub instructions: Option<&'a [String]>,
    pub dietary_tags: Option<&'a [String]>,
    pub nutrition: Option<&'a NutritionInput>,
    pub affiliate_links: Option<&'a [AffiliateLinkInput]>,
}

pub fn create_recipe(conn: &mut PgConnection, new: &NewRecipeAggregate) -> QueryResult<Uuid> {
    conn.transaction(|conn| {
        let recipe_id: Uuid = diesel::insert_into(recipes::table)
            .values(&NewRecipe {
                user_id: new.user_id,
                title: new.title,
                description: new.description,
                prep_time: new.prep_time,
                cook_time: new.cook_time,
                servings: new.servings,
                difficulty: new.difficulty,
                image_url: new.image_url,
                is_favorite: new.is_favorite,
            })
            .returning(recipes::id)
            .get_result(conn)?;

        insert_ingredients(conn, recipe_id, new.ingredients)?;
        insert_instructions(conn, recipe_id, new.instructions)?;
        upsert_nutrition(conn, recipe_id, new.nutrition)?;
        link_dietary_tags(conn, recipe_id, new.dietary_tags)?;
        insert_affiliate_links(conn, recipe_id, new.affiliate_links)?;

        Ok(recipe_id)
    })
}

/// Ownership must already be established by the caller; this only applies
/// the changes. Always bumps `updated_at`, which also keeps the changeset
/// non-empty when the payload carried no scalar fields.
pub fn update_recipe(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    update: &RecipeUpdate,
) -> QueryResult<()> {
    conn.transaction(|conn| {
        diesel::update(recipes::table.find(recipe_id))
            .set((&update.changeset, recipes::updated_at.eq(Utc::now())))
            .execute(conn)?;

        if let Some(items) = update.ingredients {
            diesel::delete(ingredients::table.filter(ingredients::recipe_id.eq(recipe_id)))
                .execute(conn)?;
            insert_ingredients(conn, recipe_id, items)?;
        }

        if let Some(steps) = update.instructions {
            diesel::delete(instructions::table.filter(instructions::recipe_id.eq(recipe_id)))
                .execute(conn)?;
            insert_instructions(conn, recipe_id, steps)?;
        }

        if let Some(n) = update.nutrition {
            upsert_nutrition(conn, recipe_id, n)?;
        }

        if let Some(tags) = update.dietary_tags {
            diesel::delete(
                recipe_dietary_tags::table.filter(recipe_dietary_tags::recipe_id.eq(recipe_id)),
            )
            .execute(conn)?;
            link_dietary_tags(conn, recipe_id, tags)?;
        }

        if let Some(links) = update.affiliate_links {
            diesel::delete(
                affiliate_links::table.filter(affiliate_links::recipe_id.eq(recipe_id)),
            )
            .execute(conn)?;
            insert_affiliate_links(conn, recipe_id, links)?;
        }

        Ok(())
    })
}

pub fn load_recipe(conn: &mut PgConnection, recipe_id: Uuid) -> QueryResult<Option<RecipeAggregate>> {
    let rows = recipes::table
        .filter(recipes::id.eq(recipe_id))
        .select(Recipe::as_select())
        .load::<Recipe>(conn)?;

    Ok(load_children(conn, rows)?.pop())
}

/// Owner-scoped listing, newest first. Filtering beyond ownership is the
/// client's concern.
pub fn list_recipes_for_user(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> QueryResult<Vec<RecipeAggregate>> {
    let rows = recipes::table
        .filter(recipes::user_id.eq(user_id))
        .order(recipes::created_at.desc())
        .select(Recipe::as_select())
        .load::<Recipe>(conn)?;

    load_children(conn, rows)
}

fn insert_ingredients(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    items: &[IngredientInput],
) -> QueryResult<()> {
    let rows: Vec<NewIngredient> = items
        .iter()
        .map(|item| NewIngredient {
            recipe_id,
            name: &item.name,
            quantity: &item.quantity,
            unit: &item.unit,
            notes: item.notes.as_deref(),
        })
        .collect();

    diesel::insert_into(ingredients::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

fn insert_instructions(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    steps: &[String],
) -> QueryResult<()> {
    // step_number reflects array position at write time
    let rows: Vec<NewInstruction> = steps
        .iter()
        .enumerate()
        .map(|(index, content)| NewInstruction {
            recipe_id,
            step_number: index as i32 + 1,
            content,
        })
        .collect();

    diesel::insert_into(instructions::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

fn upsert_nutrition(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    input: &NutritionInput,
) -> QueryResult<()> {
    let row = NewNutrition {
        recipe_id,
        calories: input.calories,
        protein: input.protein,
        carbs: input.carbs,
        fat: input.fat,
        sugar: input.sugar,
        fiber: input.fiber,
        sodium: input.sodium,
    };

    diesel::insert_into(nutrition::table)
        .values(&row)
        .on_conflict(nutrition::recipe_id)
        .do_update()
        .set(&row)
        .execute(conn)?;
    Ok(())
}

/// Tags are a global registry: upsert-ignore the name, look up its id, then
/// link it to the recipe ignoring duplicate links. Names are stored exactly
/// as submitted.
fn link_dietary_tags(conn: &mut PgConnection, recipe_id: Uuid, names: &[String]) -> QueryResult<()> {
    for name in names {
        diesel::insert_into(dietary_tags::table)
            .values(dietary_tags::name.eq(name))
            .on_conflict(dietary_tags::name)
            .do_nothing()
            .execute(conn)?;

        let tag_id: Uuid = dietary_tags::table
            .filter(dietary_tags::name.eq(name))
            .select(dietary_tags::id)
            .first(conn)?;

        diesel::insert_into(recipe_dietary_tags::table)
            .values((
                recipe_dietary_tags::recipe_id.eq(recipe_id),
                recipe_dietary_tags::tag_id.eq(tag_id),
            ))
            .on_conflict((
                recipe_dietary_tags::recipe_id,
                recipe_dietary_tags::tag_id,
            ))
            .do_nothing()
            .execute(conn)?;
    }
    Ok(())
}

fn insert_affiliate_links(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    links: &[AffiliateLinkInput],
) -> QueryResult<()> {
    let rows: Vec<NewAffiliateLink> = links
        .iter()
        .map(|link| NewAffiliateLink {
            recipe_id,
            title: &link.title,
            url: &link.url,
            description: link.description.as_deref(),
        })
        .collect();

    diesel::insert_into(affiliate_links::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

fn load_children(
    conn: &mut PgConnection,
    recipe_rows: Vec<Recipe>,
) -> QueryResult<Vec<RecipeAggregate>> {
    if recipe_rows.is_empty() {
        return Ok(Vec::new());
    }

    let ingredient_groups: Vec<Vec<IngredientRow>> = IngredientRow::belonging_to(&recipe_rows)
        .select(IngredientRow::as_select())
        .load::<IngredientRow>(conn)?
        .grouped_by(&recipe_rows);

    let instruction_groups: Vec<Vec<InstructionRow>> = InstructionRow::belonging_to(&recipe_rows)
        .order(instructions::step_number.asc())
        .select(InstructionRow::as_select())
        .load::<InstructionRow>(conn)?
        .grouped_by(&recipe_rows);

    let link_groups: Vec<Vec<AffiliateLinkRow>> = AffiliateLinkRow::belonging_to(&recipe_rows)
        .select(AffiliateLinkRow::as_select())
        .load::<AffiliateLinkRow>(conn)?
        .grouped_by(&recipe_rows);

    let mut nutrition_by_recipe: HashMap<Uuid, NutritionRow> =
        NutritionRow::belonging_to(&recipe_rows)
            .select(NutritionRow::as_select())
            .load::<NutritionRow>(conn)?
            .into_iter()
            .map(|row| (row.recipe_id, row))
            .collect();

    let ids: Vec<Uuid> = recipe_rows.iter().map(|r| r.id).collect();
    let mut tags_by_recipe: HashMap<Uuid, Vec<String>> = HashMap::new();
    let tag_rows: Vec<(Uuid, String)> = recipe_dietary_tags::table
        .inner_join(dietary_tags::table)
        .filter(recipe_dietary_tags::recipe_id.eq_any(&ids))
        .order(dietary_tags::name.asc())
        .select((recipe_dietary_tags::recipe_id, dietary_tags::name))
        .load(conn)?;
    for (recipe_id, name) in tag_rows {
        tags_by_recipe.entry(recipe_id).or_default().push(name);
    }

    Ok(recipe_rows
        .into_iter()
        .zip(ingredient_groups)
        .zip(instruction_groups)
        .zip(link_groups)
        .map(|(((recipe, ingredients), instructions), affiliate_links)| {
            let dietary_tags = tags_by_recipe.remove(&recipe.id).unwrap_or_default();
            let nutrition = nutrition_by_recipe.remove(&recipe.id);
            RecipeAggregate {
                recipe,
                ingredients,
                instructions,
                dietary_tags,
                nutrition,
                affiliate_links,
            }
        })
        .collect())
}
