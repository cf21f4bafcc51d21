// src/services/hierarchy_service.rs

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::{
    client::OrganizationSource,
    common::error::AppError,
    models::{
        organization::{LeveledOrganization, Organization, OrganizationNode, OrganizationOption},
        rbac::CallerContext,
    },
};

// ---
// Funções puras (sem estado, idempotentes)
// ---

// Índice id -> posição. Ids vazios nunca entram (não podem ser pai de ninguém).
// Em ids duplicados, vale a primeira ocorrência.
fn index_by_id(orgs: &[Organization]) -> HashMap<&str, usize> {
    let mut index = HashMap::with_capacity(orgs.len());
    for (i, org) in orgs.iter().enumerate() {
        if !org.id.is_empty() {
            index.entry(org.id.as_str()).or_insert(i);
        }
    }
    index
}

/// Percurso em pré-ordem: devolve (posição no input, nível) para cada registro.
///
/// Registros cujo pai está no conjunto viram filhos dele (na ordem do input);
/// os demais, e os registros sem id, são raízes. Quem não for alcançado a
/// partir de uma raiz está num ciclo de `parentOrganizationId`: é promovido a
/// raiz e a aresta cíclica é descartada, para que todo registro apareça
/// exatamente uma vez.
fn preorder(orgs: &[Organization]) -> Vec<(usize, usize)> {
    let index = index_by_id(orgs);
    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); orgs.len()];

    for (i, org) in orgs.iter().enumerate() {
        // Sem id não há como ancorar o registro: vira raiz
        if org.id.is_empty() {
            roots.push(i);
            continue;
        }
        match org.parent_organization_id.as_deref().and_then(|p| index.get(p)) {
            Some(&parent) => children[parent].push(i),
            None => roots.push(i),
        }
    }

    let mut visited = vec![false; orgs.len()];
    let mut order = Vec::with_capacity(orgs.len());

    for root in roots {
        walk(root, &children, &mut visited, &mut order);
    }

    for i in 0..orgs.len() {
        if !visited[i] {
            tracing::warn!(
                organization_id = %orgs[i].id,
                parent_organization_id = ?orgs[i].parent_organization_id,
                "Ciclo na hierarquia de organizações: registro promovido a raiz"
            );
            walk(i, &children, &mut visited, &mut order);
        }
    }

    order
}

// Pilha explícita: hierarquias profundas não estouram a pilha de chamadas
fn walk(
    root: usize,
    children: &[Vec<usize>],
    visited: &mut [bool],
    order: &mut Vec<(usize, usize)>,
) {
    let mut stack = vec![(root, 0)];

    while let Some((node, level)) = stack.pop() {
        if visited[node] {
            continue;
        }
        visited[node] = true;
        order.push((node, level));

        for &child in children[node].iter().rev() {
            if !visited[child] {
                stack.push((child, level + 1));
            }
        }
    }
}

/// Lista achatada em pré-ordem, anotada com o nível (0 = raiz visível).
pub fn build_visible_forest(orgs: &[Organization]) -> Vec<LeveledOrganization> {
    preorder(orgs)
        .into_iter()
        .map(|(i, level)| LeveledOrganization {
            organization: orgs[i].clone(),
            level,
        })
        .collect()
}

/// Mesma floresta, mas aninhada.
pub fn build_tree(orgs: &[Organization]) -> Vec<OrganizationNode> {
    let mut roots = Vec::new();
    let mut open: Vec<OrganizationNode> = Vec::new();

    for (i, level) in preorder(orgs) {
        while open.len() > level {
            close_node(&mut open, &mut roots);
        }
        open.push(OrganizationNode {
            organization: orgs[i].clone(),
            level,
            children: Vec::new(),
        });
    }
    while !open.is_empty() {
        close_node(&mut open, &mut roots);
    }

    roots
}

fn close_node(open: &mut Vec<OrganizationNode>, roots: &mut Vec<OrganizationNode>) {
    if let Some(node) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

/// Restringe a lista à organização do chamador e a todos os seus descendentes.
/// Super-administrador vê tudo.
///
/// Os descendentes saem do fechamento sobre `parentOrganizationId` na lista
/// bruta (não na saída nivelada). Se `caller_org_id` não existir na lista, o
/// resultado é só o conjunto de descendentes. A ordem do input é mantida.
pub fn scope_organizations(
    all: &[Organization],
    caller_org_id: &str,
    caller_is_super_admin: bool,
) -> Vec<Organization> {
    if caller_is_super_admin {
        return all.to_vec();
    }
    if caller_org_id.is_empty() {
        return Vec::new();
    }

    let mut children_by_parent: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, org) in all.iter().enumerate() {
        if let Some(parent) = org.parent_organization_id.as_deref() {
            children_by_parent.entry(parent).or_default().push(i);
        }
    }

    let mut included: Vec<bool> = all.iter().map(|org| org.id == caller_org_id).collect();
    let mut seen: HashSet<&str> = HashSet::from([caller_org_id]);
    let mut pending = vec![caller_org_id];

    while let Some(parent) = pending.pop() {
        let Some(kids) = children_by_parent.get(parent) else {
            continue;
        };
        for &child in kids {
            included[child] = true;
            let child_id = all[child].id.as_str();
            // `seen` corta os ciclos
            if !child_id.is_empty() && seen.insert(child_id) {
                pending.push(child_id);
            }
        }
    }

    all.iter()
        .zip(included)
        .filter_map(|(org, keep)| keep.then(|| org.clone()))
        .collect()
}

pub fn scope_for_caller(all: &[Organization], caller: &CallerContext) -> Vec<Organization> {
    scope_organizations(all, &caller.organization_id, caller.is_super_admin())
}

// ---
// Serviço: busca no backend + funções puras
// ---

#[derive(Clone)]
pub struct HierarchyService {
    source: Arc<dyn OrganizationSource>,
}

impl HierarchyService {
    pub fn new(source: Arc<dyn OrganizationSource>) -> Self {
        Self { source }
    }

    // Busca a lista completa e aplica o escopo do chamador.
    // Nivelar vem depois, sobre o conjunto já visível.
    async fn scoped(
        &self,
        caller: &CallerContext,
        auth: Option<&str>,
    ) -> Result<Vec<Organization>, AppError> {
        let all = self.source.fetch_organizations(auth).await?;
        let scoped = scope_for_caller(&all, caller);

        tracing::debug!(
            role = ?caller.role,
            organization_id = %caller.organization_id,
            total = all.len(),
            visible = scoped.len(),
            "Organizações filtradas para o chamador"
        );

        Ok(scoped)
    }

    pub async fn visible_organizations(
        &self,
        caller: &CallerContext,
        auth: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<LeveledOrganization>, AppError> {
        let scoped = self.scoped(caller, auth).await?;
        let mut leveled = build_visible_forest(&scoped);

        // A busca roda depois do nivelamento: os níveis continuam relativos à floresta visível
        if let Some(term) = search {
            leveled.retain(|entry| entry.organization.matches(term));
        }

        Ok(leveled)
    }

    pub async fn visible_tree(
        &self,
        caller: &CallerContext,
        auth: Option<&str>,
    ) -> Result<Vec<OrganizationNode>, AppError> {
        let scoped = self.scoped(caller, auth).await?;
        Ok(build_tree(&scoped))
    }

    pub async fn organization_options(
        &self,
        caller: &CallerContext,
        auth: Option<&str>,
    ) -> Result<Vec<OrganizationOption>, AppError> {
        let leveled = self.visible_organizations(caller, auth, None).await?;
        Ok(leveled.iter().map(OrganizationOption::from).collect())
    }
}
